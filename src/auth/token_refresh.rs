//! OAuth 2.0 client-credentials exchange.
//!
//! [`TokenRefresher::refresh`] posts the client id and secret to
//! `{auth_host}/connect/token` and stores the returned bearer token in the
//! [`CredentialStore`].
//!
//! # Outcomes
//!
//! | Response | Result | Store |
//! |---|---|---|
//! | 2xx with `access_token` and `expires_in` | `Ok(true)` | replaced |
//! | 2xx with `null` or an unparseable body | `Ok(false)` | untouched |
//! | non-2xx | classified [`HttpError`] | untouched |
//!
//! The malformed-body case is a soft failure: the caller goes on with the
//! previous token and lets the API reject it if it is stale.

use chrono::Utc;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::auth::CredentialStore;
use crate::clients::{classify, run_cancellable, service_url, HttpError, Namespace, ResourceAddress};
use crate::config::HostUrl;

/// Grant type for client credentials.
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Scope requested for API access.
pub const API_SCOPE: &str = "napi.api";

const TOKEN_NAMESPACE: Namespace = Namespace::from_static("connect");

/// Successful token endpoint payload.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Lifetime in seconds from issue.
    pub expires_in: i64,
    /// Usually `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
}

/// Performs the client-credentials exchange for one [`CredentialStore`].
#[derive(Debug)]
pub struct TokenRefresher<'a> {
    http: &'a reqwest::Client,
    auth_host: &'a HostUrl,
    store: &'a CredentialStore,
}

impl<'a> TokenRefresher<'a> {
    /// Creates a refresher that sends through `http`.
    #[must_use]
    pub const fn new(http: &'a reqwest::Client, auth_host: &'a HostUrl, store: &'a CredentialStore) -> Self {
        Self {
            http,
            auth_host,
            store,
        }
    }

    /// Requests a new bearer token.
    ///
    /// Returns `Ok(true)` when a token was stored and `Ok(false)` when the
    /// server answered 2xx with a body that is not a token.
    ///
    /// # Errors
    ///
    /// - The classified [`HttpError`] on a non-2xx response
    /// - [`HttpError::Network`] if the exchange could not be sent
    /// - [`HttpError::Cancelled`] if `cancel` fires first
    pub async fn refresh(&self, cancel: Option<&CancellationToken>) -> Result<bool, HttpError> {
        let url = service_url(self.auth_host, &TOKEN_NAMESPACE, &ResourceAddress::new(["token"]))?;

        let form = [
            ("grant_type", CLIENT_CREDENTIALS_GRANT_TYPE),
            ("client_id", self.store.client_id().as_ref()),
            ("client_secret", self.store.client_secret().as_ref()),
            ("scope", API_SCOPE),
        ];

        tracing::debug!(url = %url, client_id = self.store.client_id().as_ref(), "requesting bearer token");

        let response = run_cancellable(cancel, self.http.post(url).form(&form).send()).await??;
        let status = response.status();
        let body = run_cancellable(cancel, response.text()).await??;

        if !status.is_success() {
            return Err(classify(status, &body));
        }

        let token = match serde_json::from_str::<Option<TokenResponse>>(&body) {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::warn!(status = status.as_u16(), "token endpoint returned an empty body");
                return Ok(false);
            }
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "token endpoint returned a malformed body");
                return Ok(false);
            }
        };

        self.store.store(token.access_token, token.expires_in, Utc::now());
        tracing::debug!(expires_in = token.expires_in, "bearer token refreshed");

        Ok(true)
    }
}
