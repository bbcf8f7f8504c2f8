//! The top-level client.

use std::sync::Arc;

use crate::clients::Context;
use crate::config::{ClientId, ClientSecret, TruliooConfig};
use crate::error::ConfigError;
use crate::products::{Configuration, Connection, Kyb, PersonFraud, Verification};

/// Entry point to the Trulioo API.
///
/// Cloning is cheap and every clone shares one [`Context`]: one credential
/// store, one bearer token and one connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use trulioo_client::TruliooClient;
///
/// let client = TruliooClient::from_credentials("client-id", "client-secret")?;
/// let greeting = client.connection().say_hello("Jane", None).await?;
///
/// client.close();
/// ```
#[derive(Clone, Debug)]
pub struct TruliooClient {
    context: Arc<Context>,
}

impl TruliooClient {
    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: TruliooConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_context(Context::new(config)?))
    }

    /// Creates a client for the production hosts with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] or
    /// [`ConfigError::EmptyClientSecret`] for blank credentials.
    pub fn from_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = TruliooConfig::builder()
            .client_id(ClientId::new(client_id)?)
            .client_secret(ClientSecret::new(client_secret)?)
            .build()?;
        Self::new(config)
    }

    /// Creates a client that sends through an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: TruliooConfig, http: reqwest::Client) -> Self {
        Self::from_context(Context::with_http_client(config, http))
    }

    /// Wraps an existing context.
    #[must_use]
    pub fn from_context(context: Context) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Returns the shared dispatcher.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn connection(&self) -> Connection<'_> {
        Connection::new(&self.context)
    }

    #[must_use]
    pub fn configuration(&self) -> Configuration<'_> {
        Configuration::new(&self.context)
    }

    #[must_use]
    pub fn verification(&self) -> Verification<'_> {
        Verification::new(&self.context)
    }

    #[must_use]
    pub fn kyb(&self) -> Kyb<'_> {
        Kyb::new(&self.context)
    }

    #[must_use]
    pub fn person_fraud(&self) -> PersonFraud<'_> {
        PersonFraud::new(&self.context)
    }

    /// Closes the shared transport for every clone of this client.
    ///
    /// Returns `true` on the first call only.
    pub fn close(&self) -> bool {
        self.context.close()
    }

    /// Returns `true` once the transport has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.context.is_closed()
    }
}

// Verify TruliooClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TruliooClient>();
};
