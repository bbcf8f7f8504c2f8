//! Authentication for the Trulioo API client.
//!
//! The API uses the OAuth 2.0 client-credentials grant. A bearer token is
//! requested lazily, kept in a [`CredentialStore`], and renewed once it is
//! within the configured refresh buffer of its expiry.
//!
//! # Overview
//!
//! - [`CredentialStore`]: client id, client secret and the current token
//! - [`BearerToken`]: a token value and its expiry instant
//! - [`TokenRefresher`]: the `POST /connect/token` exchange
//!
//! Callers rarely use these directly: the
//! [`Context`](crate::clients::Context) refreshes before each request when
//! needed.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use chrono::Utc;
//! use trulioo_client::auth::CredentialStore;
//! use trulioo_client::{ClientId, ClientSecret};
//!
//! let store = CredentialStore::new(
//!     ClientId::new("id").unwrap(),
//!     ClientSecret::new("secret").unwrap(),
//! );
//!
//! // No token has been issued yet
//! assert!(store.needs_refresh(Utc::now(), Duration::from_millis(100)));
//!
//! store.store("T", 1800, Utc::now());
//! assert!(!store.needs_refresh(Utc::now(), Duration::from_millis(100)));
//! ```

mod credentials;
mod token_refresh;

pub use credentials::{BearerToken, CredentialStore};
pub use token_refresh::{TokenRefresher, TokenResponse, API_SCOPE};
