//! # Trulioo API Rust Client
//!
//! An async client for the Trulioo identity verification API: person
//! verification, Know Your Business, person fraud checks and the account
//! configuration behind them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`TruliooConfig`] and [`TruliooConfigBuilder`]
//! - Validated newtypes for credentials and hosts
//! - OAuth 2.0 client-credentials tokens, requested lazily and renewed shortly
//!   before they expire
//! - A shared request dispatcher ([`clients::Context`]) with typed error
//!   classification, cancellation and buffered document downloads
//! - Product facades reachable from [`TruliooClient`]
//! - PascalCase request and response types in [`models`]
//!
//! ## Quick Start
//!
//! ```rust
//! use trulioo_client::{ClientId, ClientSecret, TruliooClient, TruliooConfig};
//!
//! let config = TruliooConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = TruliooClient::new(config).unwrap();
//! assert!(!client.is_closed());
//! ```
//!
//! ## Verifying a Person
//!
//! ```rust,ignore
//! use trulioo_client::models::{DataFields, PersonInfo, VerifyRequest};
//!
//! let request = VerifyRequest {
//!     accept_trulioo_terms_and_conditions: true,
//!     country_code: "US".to_string(),
//!     data_fields: DataFields {
//!         person_info: Some(PersonInfo {
//!             first_given_name: Some("John".to_string()),
//!             first_sur_name: Some("Smith".to_string()),
//!             ..PersonInfo::default()
//!         }),
//!         ..DataFields::default()
//!     },
//!     ..VerifyRequest::default()
//! };
//!
//! let result = client.verification().verify(&request, None).await?;
//! println!("Transaction {}", result.transaction_id);
//! ```
//!
//! ## Cancellation
//!
//! Every operation takes an optional
//! [`CancellationToken`](tokio_util::sync::CancellationToken). Cancelling it
//! aborts the operation at its next suspension point with
//! [`HttpError::Cancelled`] and releases the connection:
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let report = client
//!     .kyb()
//!     .business_report("transaction-record-id", true, Some(&cancel))
//!     .await;
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems are [`ConfigError`]s. Every request-time failure is
//! an [`HttpError`]; non-2xx responses map onto one variant per status with
//! the server's code, message and reason attached. Nothing is retried.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod products;

mod client;

// Re-export public types at crate root for convenience
pub use client::TruliooClient;
pub use config::{ClientId, ClientSecret, HostUrl, TruliooConfig, TruliooConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{Context, DownloadedDocument, HttpError, RequestError};
