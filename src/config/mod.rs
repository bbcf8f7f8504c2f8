//! Configuration types for the Trulioo API client.
//!
//! # Overview
//!
//! - [`TruliooConfig`]: The main configuration struct holding all client settings
//! - [`TruliooConfigBuilder`]: A builder for constructing [`TruliooConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`HostUrl`]: A validated API or authentication host
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use trulioo_client::{ClientId, ClientSecret, TruliooConfig};
//!
//! let config = TruliooConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_host().host_name(), Some("api.trulioo.com"));
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, HostUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default API host.
pub const DEFAULT_API_HOST: &str = "api.trulioo.com";

/// Default authentication host.
pub const DEFAULT_AUTH_HOST: &str = "auth-api.trulioo.com";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Default margin subtracted from the token expiry before a refresh is forced.
pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::from_millis(100);

/// Configuration for the Trulioo API client.
///
/// `TruliooConfig` is `Clone`, `Send`, and `Sync`, so one configuration can
/// back several clients.
///
/// # Example
///
/// ```rust
/// use trulioo_client::{ClientId, ClientSecret, HostUrl, TruliooConfig};
///
/// let config = TruliooConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .api_host(HostUrl::new("api.sandbox.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_host().host_name(), Some("api.sandbox.example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct TruliooConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    api_host: HostUrl,
    auth_host: HostUrl,
    timeout: Duration,
    refresh_buffer: Duration,
    user_agent_prefix: Option<String>,
}

impl TruliooConfig {
    /// Creates a new builder for constructing a `TruliooConfig`.
    #[must_use]
    pub fn builder() -> TruliooConfigBuilder {
        TruliooConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &HostUrl {
        &self.api_host
    }

    /// Returns the authentication host.
    #[must_use]
    pub const fn auth_host(&self) -> &HostUrl {
        &self.auth_host
    }

    /// Returns the HTTP timeout applied to the default transport.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the refresh buffer.
    ///
    /// A token is renewed once `now >= expires_at - refresh_buffer`.
    #[must_use]
    pub const fn refresh_buffer(&self) -> Duration {
        self.refresh_buffer
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify TruliooConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TruliooConfig>();
};

/// Builder for constructing [`TruliooConfig`] instances.
///
/// Required fields are `client_id` and `client_secret`.
///
/// # Defaults
///
/// - `api_host`: `api.trulioo.com`
/// - `auth_host`: `auth-api.trulioo.com`
/// - `timeout`: 100 seconds
/// - `refresh_buffer`: 100 milliseconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct TruliooConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    api_host: Option<HostUrl>,
    auth_host: Option<HostUrl>,
    timeout: Option<Duration>,
    refresh_buffer: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl TruliooConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Overrides the authentication host.
    #[must_use]
    pub fn auth_host(mut self, host: HostUrl) -> Self {
        self.auth_host = Some(host);
        self
    }

    /// Overrides the HTTP timeout.
    ///
    /// Only applies to the transport built by the client. An injected
    /// `reqwest::Client` keeps its own timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the refresh buffer.
    #[must_use]
    pub const fn refresh_buffer(mut self, buffer: Duration) -> Self {
        self.refresh_buffer = Some(buffer);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`TruliooConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` or
    /// `client_secret` are not set.
    pub fn build(self) -> Result<TruliooConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;

        let api_host = match self.api_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_API_HOST)?,
        };
        let auth_host = match self.auth_host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_AUTH_HOST)?,
        };

        Ok(TruliooConfig {
            client_id,
            client_secret,
            api_host,
            auth_host,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            refresh_buffer: self.refresh_buffer.unwrap_or(DEFAULT_REFRESH_BUFFER),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
