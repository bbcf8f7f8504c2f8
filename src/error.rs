//! Error types for the Trulioo API client.
//!
//! This module contains the configuration error raised while building a
//! [`TruliooConfig`](crate::TruliooConfig). Request-time failures live in
//! [`clients::HttpError`](crate::clients::HttpError).
//!
//! # Example
//!
//! ```rust
//! use trulioo_client::{ClientId, ConfigError};
//!
//! let result = ClientId::new("   ");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid Trulioo client ID.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid Trulioo client secret.")]
    EmptyClientSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Expected a host name (e.g., 'api.trulioo.com') or an absolute URL.")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP transport: {reason}")]
    Transport {
        /// The underlying builder failure.
        reason: String,
    },
}

impl ConfigError {
    /// Returns `true` when the error describes missing or empty credentials.
    #[must_use]
    pub const fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::EmptyClientId | Self::EmptyClientSecret)
    }
}
