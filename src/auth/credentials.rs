//! Credential storage for the client-credentials flow.
//!
//! A [`CredentialStore`] owns the client id, the client secret and the
//! current [`BearerToken`]. The token starts out empty and already expired,
//! so the first dispatched call always triggers a refresh.

use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::{ClientId, ClientSecret};

/// A bearer token and the instant it stops being valid.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl BearerToken {
    /// Creates a token that expires at `expires_at`.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// An empty token that has always been expired.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new(), DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if no token has been issued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns `true` once `now >= expires_at - buffer`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        chrono::Duration::from_std(buffer)
            .ok()
            .and_then(|buffer| now.checked_add_signed(buffer))
            .map_or(true, |threshold| threshold >= self.expires_at)
    }
}

impl Default for BearerToken {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &if self.is_empty() { "" } else { "*****" })
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Client credentials plus the current bearer token.
///
/// Reads take a snapshot of the token. Writes replace it whole, so a
/// concurrent reader sees either the old or the new token, never a mix.
#[derive(Debug)]
pub struct CredentialStore {
    client_id: ClientId,
    client_secret: ClientSecret,
    token: RwLock<BearerToken>,
}

impl CredentialStore {
    /// Creates a store with no token.
    #[must_use]
    pub fn new(client_id: ClientId, client_secret: ClientSecret) -> Self {
        Self {
            client_id,
            client_secret,
            token: RwLock::new(BearerToken::empty()),
        }
    }

    /// Returns the client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub(crate) const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns a snapshot of the current token.
    #[must_use]
    pub fn bearer_token(&self) -> BearerToken {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if the current token must be renewed before use.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .needs_refresh(now, buffer)
    }

    /// Stores a token issued at `issued_at` that lives for `expires_in_secs`.
    ///
    /// Out-of-range lifetimes saturate at the representable bounds.
    pub fn store(&self, access_token: impl Into<String>, expires_in_secs: i64, issued_at: DateTime<Utc>) {
        let expires_at = chrono::Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(if expires_in_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });

        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            BearerToken::new(access_token, expires_at);
    }
}

// Verify CredentialStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CredentialStore>();
};
