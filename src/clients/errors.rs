//! HTTP-specific error types for the Trulioo API client.
//!
//! # Error Handling
//!
//! - [`RequestError`]: the `(message, code, reason)` triple carried by every
//!   classified non-2xx response
//! - [`HttpError`]: unified error type for every dispatched operation
//!
//! # Example
//!
//! ```rust,ignore
//! use trulioo_client::clients::HttpError;
//!
//! match client.connection().test_authentication(None).await {
//!     Ok(body) => println!("Authenticated: {body}"),
//!     Err(HttpError::AuthenticationFailure(e)) => {
//!         println!("Rejected credentials ({}): {}", e.code, e.message);
//!     }
//!     Err(HttpError::Cancelled) => println!("Cancelled"),
//!     Err(other) => println!("Request failed: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// Error details extracted from a non-successful API response.
///
/// `code` is the server-supplied error code when the body carried one, or
/// the HTTP status code otherwise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct RequestError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Server-supplied error code, or the HTTP status.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Machine-oriented detail, if any.
    pub reason: Option<String>,
}

/// Unified error type for all dispatched operations.
///
/// The status-derived variants map one-to-one onto HTTP status codes; see
/// [`classify`](crate::clients::classify).
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP 400.
    #[error("Bad request: {0}")]
    BadRequest(RequestError),

    /// HTTP 401.
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(RequestError),

    /// HTTP 403.
    #[error("Access denied: {0}")]
    AccessDenied(RequestError),

    /// HTTP 404.
    #[error("Resource not found: {0}")]
    ResourceNotFound(RequestError),

    /// HTTP 500.
    #[error("Internal server error: {0}")]
    InternalServerError(RequestError),

    /// Any other non-2xx status.
    #[error("Request failed: {0}")]
    Request(RequestError),

    /// The caller's cancellation token fired before the operation completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// A precondition was violated before any request was sent.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the arguments.
        message: String,
    },

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request payload could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(serde_json::Error),

    /// A successful response could not be deserialized into the requested type.
    #[error("Failed to deserialize response (status {status}): {message}")]
    Deserialization {
        /// The HTTP status code.
        status: u16,
        /// The serde error message.
        message: String,
        /// The raw response body.
        raw_body: String,
    },

    /// The client has been closed and its transport released.
    #[error("Client has been closed")]
    Closed,
}

impl HttpError {
    /// Builds an [`HttpError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns the classified response details, if this error came from a
    /// non-2xx response.
    #[must_use]
    pub const fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::BadRequest(e)
            | Self::AuthenticationFailure(e)
            | Self::AccessDenied(e)
            | Self::ResourceNotFound(e)
            | Self::InternalServerError(e)
            | Self::Request(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the numeric code for this error.
    ///
    /// Classified responses report the server error code; network and
    /// deserialization failures report the HTTP status when one is known.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Network(e) => e.status().map(|s| i32::from(s.as_u16())),
            Self::Deserialization { status, .. } => Some(i32::from(*status)),
            other => other.request_error().map(|e| e.code),
        }
    }

    /// Returns the error message.
    ///
    /// Classified responses report the server message; every other variant
    /// reports its display text.
    #[must_use]
    pub fn message(&self) -> String {
        self.request_error()
            .map_or_else(|| self.to_string(), |e| e.message.clone())
    }

    /// Returns the machine-oriented reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.request_error().and_then(|e| e.reason.as_deref())
    }

    /// Returns `true` if this error is [`HttpError::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// Verify errors are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
