//! HTTP client layer for Trulioo API communication.
//!
//! This module provides the request dispatcher and the pieces it is built
//! from: resource addressing, request construction, error classification,
//! cancellation and document downloads.
//!
//! # Overview
//!
//! - [`Context`]: the dispatcher shared by all product facades
//! - [`Namespace`] and [`ResourceAddress`]: `{namespace}/{segments}` paths
//! - [`PendingRequest`] and [`HttpMethod`]: a single outgoing request
//! - [`classify`] and [`ErrorEnvelope`]: non-2xx response handling
//! - [`HttpError`] and [`RequestError`]: the error taxonomy
//! - [`DownloadedDocument`]: a named file returned by download endpoints
//!
//! # Error Classification
//!
//! - **400**: [`HttpError::BadRequest`]
//! - **401**: [`HttpError::AuthenticationFailure`]
//! - **403**: [`HttpError::AccessDenied`]
//! - **404**: [`HttpError::ResourceNotFound`]
//! - **500**: [`HttpError::InternalServerError`]
//! - **Other non-2xx**: [`HttpError::Request`]
//!
//! Failures are never retried.

mod cancel;
mod classifier;
mod context;
mod errors;
mod http_request;
mod http_response;
mod resource;

pub use cancel::run_cancellable;
pub use classifier::{classify, ErrorEnvelope};
pub use context::{Context, DEFAULT_USER_AGENT, SDK_VERSION};
pub use errors::{HttpError, RequestError};
pub use http_request::{HttpMethod, PendingRequest, JSON_CONTENT_TYPE};
pub use http_response::{content_disposition_filename, DownloadedDocument, DEFAULT_DOCUMENT_NAME};
pub use resource::{merge_query, service_url, Namespace, QueryParams, ResourceAddress};
