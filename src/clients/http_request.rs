//! HTTP request types for the Trulioo API client.
//!
//! A [`PendingRequest`] is built fresh for every call and consumed when it is
//! sent. The bearer token is captured at construction, which happens after
//! any refresh triggered by the same call.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

/// Content type sent with JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and running checks.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the equivalent `reqwest` method.
    #[must_use]
    pub const fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully resolved request, ready to hand to the transport.
#[derive(Clone)]
pub struct PendingRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute target URL, query included.
    pub url: Url,
    /// The serialized JSON body, if any.
    pub body: Option<String>,
    bearer_token: String,
}

impl PendingRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url, bearer_token: impl Into<String>) -> Self {
        Self {
            method,
            url,
            body: None,
            bearer_token: bearer_token.into(),
        }
    }

    /// Sets an already serialized JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }

    /// Converts this request into a `reqwest` builder on `client`.
    ///
    /// `default_headers` are applied first so the per-request headers win.
    #[must_use]
    pub fn into_builder(
        self,
        client: &reqwest::Client,
        default_headers: &HeaderMap,
    ) -> reqwest::RequestBuilder {
        let authorization = self.authorization();
        let mut builder = client
            .request(self.method.as_reqwest(), self.url)
            .headers(default_headers.clone());

        builder = match HeaderValue::from_str(&authorization) {
            Ok(mut value) => {
                value.set_sensitive(true);
                builder.header(AUTHORIZATION, value)
            }
            // Tokens with control characters cannot be sent; the server
            // answers 401, which surfaces as AuthenticationFailure.
            Err(_) => builder,
        };

        if let Some(body) = self.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .body(body);
        }

        builder
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("body", &self.body.as_ref().map(String::len))
            .field("authorization", &"Bearer *****")
            .finish()
    }
}
