//! Connectivity checks.

use tokio_util::sync::CancellationToken;

use crate::clients::{Context, HttpError, Namespace, ResourceAddress};

const NAMESPACE: Namespace = Namespace::from_static("connection");

/// Connectivity and credential checks.
#[derive(Clone, Copy, Debug)]
pub struct Connection<'a> {
    context: &'a Context,
}

impl<'a> Connection<'a> {
    pub(crate) const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Asks the API to greet `name`. Useful to check reachability.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn say_hello(
        &self,
        name: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, HttpError> {
        self.context
            .get_text(&NAMESPACE, &ResourceAddress::new(["sayhello", name]), None, cancel)
            .await
    }

    /// Checks that the configured credentials are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::AuthenticationFailure`] if they are not.
    pub async fn test_authentication(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, HttpError> {
        self.context
            .get_text(&NAMESPACE, &ResourceAddress::new(["testauthentication"]), None, cancel)
            .await
    }
}
