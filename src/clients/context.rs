//! The request dispatcher shared by every product facade.
//!
//! A [`Context`] owns the configuration, the [`CredentialStore`] and one
//! pooled `reqwest::Client`. Each operation:
//!
//! 1. takes a lease on the transport (fails with [`HttpError::Closed`] after
//!    [`Context::close`]),
//! 2. refreshes the bearer token inline if it is within the refresh buffer
//!    of its expiry,
//! 3. builds `{api_host}/{namespace}/{resource}[?query]` and sends the
//!    request with the current token,
//! 4. hands the raw response to a caller-supplied processor, or classifies
//!    non-2xx responses and decodes the body as JSON, text or a byte buffer.
//!
//! Every suspension point is raced against the caller's
//! [`CancellationToken`]. Dropping the returned future cancels as well.
//!
//! # Example
//!
//! ```rust,ignore
//! use trulioo_client::clients::{Context, Namespace, ResourceAddress};
//!
//! let context = Context::new(config)?;
//! let namespace = Namespace::from_static("connection");
//! let greeting = context
//!     .get_text(&namespace, &ResourceAddress::new(["sayhello", "Jane"]), None, None)
//!     .await?;
//! ```

use std::future::Future;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::auth::{CredentialStore, TokenRefresher};
use crate::clients::cancel::run_cancellable;
use crate::clients::classifier::classify;
use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, PendingRequest};
use crate::clients::resource::{merge_query, service_url, Namespace, QueryParams, ResourceAddress};
use crate::config::TruliooConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent when no prefix is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("trulioo-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Upper bound on the buffer reserved up front by [`Context::get_stream`].
const MAX_STREAM_PREALLOCATION: usize = 1 << 20;

/// Shared dispatcher state for one set of client credentials.
#[derive(Debug)]
pub struct Context {
    config: TruliooConfig,
    credentials: CredentialStore,
    transport: Transport,
    default_headers: HeaderMap,
}

impl Context {
    /// Creates a context with its own `reqwest` transport.
    ///
    /// The transport uses rustls, the configured timeout, and gzip decoding.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: TruliooConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .gzip(true)
            .build()
            .map_err(|e| ConfigError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self::with_http_client(config, http))
    }

    /// Creates a context that sends through `http`.
    ///
    /// The injected client keeps its own timeout and TLS settings.
    #[must_use]
    pub fn with_http_client(config: TruliooConfig, http: reqwest::Client) -> Self {
        let user_agent = config.user_agent_prefix().map_or_else(
            || HeaderValue::from_static(DEFAULT_USER_AGENT),
            |prefix| {
                HeaderValue::from_str(&format!("{prefix} | {DEFAULT_USER_AGENT}"))
                    .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT))
            },
        );

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, user_agent);
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let credentials = CredentialStore::new(
            config.client_id().clone(),
            config.client_secret().clone(),
        );

        Self {
            config,
            credentials,
            transport: Transport::new(http),
            default_headers,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TruliooConfig {
        &self.config
    }

    /// Returns the credential store.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Returns the headers sent with every API request.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the number of operations currently holding the transport.
    #[must_use]
    pub fn open_requests(&self) -> usize {
        self.transport.in_flight.load(Ordering::Acquire)
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Releases the transport.
    ///
    /// Returns `true` on the first call and `false` afterwards. Operations
    /// already in flight run to completion; new ones fail with
    /// [`HttpError::Closed`]. The bearer token is not revoked.
    pub fn close(&self) -> bool {
        let closed = self.transport.close();
        if closed {
            tracing::debug!("transport closed");
        }
        closed
    }

    /// Requests a new bearer token regardless of the current expiry.
    ///
    /// # Errors
    ///
    /// See [`TokenRefresher::refresh`]. Also fails with
    /// [`HttpError::Closed`] after [`close`](Self::close).
    pub async fn refresh_token(&self, cancel: Option<&CancellationToken>) -> Result<bool, HttpError> {
        let lease = self.transport.acquire()?;
        TokenRefresher::new(&lease.client, self.config.auth_host(), &self.credentials)
            .refresh(cancel)
            .await
    }

    /// Sends a GET and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] for a non-2xx response,
    /// [`HttpError::Deserialization`] if the body does not match `T`, or
    /// [`HttpError::Cancelled`] if `cancel` fires first.
    pub async fn get<T: DeserializeOwned>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        query: Option<&QueryParams>,
        cancel: Option<&CancellationToken>,
    ) -> Result<T, HttpError> {
        let exchange = self.send(HttpMethod::Get, namespace, resource, query, None, cancel).await?;
        let (status, body) = exchange.into_success(cancel).await?.text(cancel).await?;
        decode(status, body)
    }

    /// Sends a GET and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] for a non-2xx response.
    pub async fn get_text(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        query: Option<&QueryParams>,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, HttpError> {
        let exchange = self.send(HttpMethod::Get, namespace, resource, query, None, cancel).await?;
        let (_, body) = exchange.into_success(cancel).await?.text(cancel).await?;
        Ok(body)
    }

    /// Sends a GET and hands the raw response to `processor`.
    ///
    /// The processor sees every status, including failures, and owns the
    /// whole interpretation of the response. Nothing is classified or
    /// decoded on its behalf.
    ///
    /// # Errors
    ///
    /// Returns whatever `processor` returns, or [`HttpError::Cancelled`].
    pub async fn get_with<T, F, Fut>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        query: Option<&QueryParams>,
        processor: F,
        cancel: Option<&CancellationToken>,
    ) -> Result<T, HttpError>
    where
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T, HttpError>>,
    {
        let Exchange { response, lease: _lease } =
            self.send(HttpMethod::Get, namespace, resource, query, None, cancel).await?;
        run_cancellable(cancel, processor(response)).await?
    }

    /// Sends a GET and copies the response body into a buffer positioned at
    /// the start.
    ///
    /// The network response is released before this returns, on success,
    /// error and cancellation alike.
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] for a non-2xx response,
    /// [`HttpError::Network`] if the body stream fails, or
    /// [`HttpError::Cancelled`].
    pub async fn get_stream(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        query: Option<&QueryParams>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Cursor<Vec<u8>>, HttpError> {
        let exchange = self.send(HttpMethod::Get, namespace, resource, query, None, cancel).await?;
        let Exchange {
            mut response,
            lease: _lease,
        } = exchange.into_success(cancel).await?;

        // Content-Length is only a hint; a lying server must not size the buffer.
        let capacity = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok())
            .map_or(0, |len| len.min(MAX_STREAM_PREALLOCATION));
        let mut buffer = Vec::with_capacity(capacity);
        while let Some(chunk) = run_cancellable(cancel, response.chunk()).await?? {
            buffer.extend_from_slice(&chunk);
        }

        Ok(Cursor::new(buffer))
    }

    /// Sends a POST with an optional JSON body and deserializes the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if `body` cannot be encoded, plus
    /// everything [`get`](Self::get) can return.
    pub async fn post<B, T>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = body.map(serialize_body).transpose()?;
        let exchange = self.send(HttpMethod::Post, namespace, resource, None, payload, cancel).await?;
        let (status, body) = exchange.into_success(cancel).await?.text(cancel).await?;
        decode(status, body)
    }

    /// Sends a POST and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] or the classified [`HttpError`].
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), HttpError> {
        self.send_no_content(HttpMethod::Post, namespace, resource, body, cancel).await
    }

    /// Sends a PUT and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] or the classified [`HttpError`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), HttpError> {
        self.send_no_content(HttpMethod::Put, namespace, resource, body, cancel).await
    }

    /// Sends a DELETE and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] or the classified [`HttpError`].
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        namespace: &Namespace,
        resource: &ResourceAddress,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), HttpError> {
        self.send_no_content(HttpMethod::Delete, namespace, resource, body, cancel).await
    }

    async fn send_no_content<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        namespace: &Namespace,
        resource: &ResourceAddress,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), HttpError> {
        let payload = body.map(serialize_body).transpose()?;
        let exchange = self.send(method, namespace, resource, None, payload, cancel).await?;
        exchange.into_success(cancel).await?.text(cancel).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: HttpMethod,
        namespace: &Namespace,
        resource: &ResourceAddress,
        query: Option<&QueryParams>,
        body: Option<String>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Exchange<'_>, HttpError> {
        let lease = self.transport.acquire().map_err(|e| {
            tracing::warn!(%method, namespace = %namespace, resource = %resource, "request after close");
            e
        })?;

        self.ensure_fresh_token(&lease.client, cancel).await?;

        let mut url = service_url(self.config.api_host(), namespace, resource)?;
        if let Some(query) = query {
            merge_query(&mut url, query);
        }

        let request = PendingRequest::new(method, url, self.credentials.bearer_token().value())
            .with_body(body);
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let builder = request.into_builder(&lease.client, &self.default_headers);
        let response = run_cancellable(cancel, builder.send()).await??;
        tracing::debug!(status = response.status().as_u16(), "response received");

        Ok(Exchange { response, lease })
    }

    async fn ensure_fresh_token(
        &self,
        http: &reqwest::Client,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), HttpError> {
        if !self
            .credentials
            .needs_refresh(Utc::now(), self.config.refresh_buffer())
        {
            return Ok(());
        }

        let refreshed = TokenRefresher::new(http, self.config.auth_host(), &self.credentials)
            .refresh(cancel)
            .await?;
        if !refreshed {
            tracing::warn!("token refresh yielded no token, sending with previous credentials");
        }
        Ok(())
    }
}

// Verify Context is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Context>();
};

fn serialize_body<B: Serialize + ?Sized>(body: &B) -> Result<String, HttpError> {
    serde_json::to_string(body).map_err(HttpError::Serialization)
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T, HttpError> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => Err(HttpError::Deserialization {
            status: status.as_u16(),
            message: e.to_string(),
            raw_body: body,
        }),
    }
}

/// The pooled client, shared by all operations until closed.
#[derive(Debug)]
struct Transport {
    client: RwLock<Option<reqwest::Client>>,
    in_flight: AtomicUsize,
}

impl Transport {
    fn new(client: reqwest::Client) -> Self {
        Self {
            client: RwLock::new(Some(client)),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn acquire(&self) -> Result<TransportLease<'_>, HttpError> {
        let client = self
            .client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(HttpError::Closed)?;
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        Ok(TransportLease {
            client,
            in_flight: &self.in_flight,
        })
    }

    fn close(&self) -> bool {
        self.client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    fn is_closed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

/// Counts one in-flight operation until dropped.
struct TransportLease<'a> {
    client: reqwest::Client,
    in_flight: &'a AtomicUsize,
}

impl Drop for TransportLease<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A response together with the lease that keeps it counted.
struct Exchange<'a> {
    response: Response,
    lease: TransportLease<'a>,
}

impl Exchange<'_> {
    async fn into_success(self, cancel: Option<&CancellationToken>) -> Result<Self, HttpError> {
        let status = self.response.status();
        if status.is_success() {
            return Ok(self);
        }

        let body = run_cancellable(cancel, self.response.text()).await??;
        tracing::debug!(status = status.as_u16(), "request failed");
        Err(classify(status, &body))
    }

    async fn text(self, cancel: Option<&CancellationToken>) -> Result<(StatusCode, String), HttpError> {
        let status = self.response.status();
        let body = run_cancellable(cancel, self.response.text()).await??;
        Ok((status, body))
    }
}
