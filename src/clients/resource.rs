//! Resource addressing for API requests.
//!
//! Every request targets `{host}/{namespace}/{resource}`, where the
//! [`Namespace`] names an API area and the [`ResourceAddress`] is the ordered
//! list of path segments below it.
//!
//! # Example
//!
//! ```rust
//! use trulioo_client::clients::ResourceAddress;
//!
//! let resource = ResourceAddress::new(["v3", "business", "search"]);
//! assert_eq!(resource.path(), "v3/business/search");
//!
//! let country: Option<&str> = None;
//! let resource = ResourceAddress::from_optional([
//!     Some("v3"),
//!     Some("business"),
//!     Some("businessregistrationnumbers"),
//!     country,
//!     None,
//! ]);
//! assert_eq!(resource.path(), "v3/business/businessregistrationnumbers");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::clients::errors::HttpError;
use crate::config::HostUrl;

/// Query parameters merged into a request URL.
///
/// Ordered by key so the encoded query string is deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// Top-level API area, such as `kyb` or `configuration`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace(Cow<'static, str>);

impl Namespace {
    /// Creates a namespace from a static string.
    ///
    /// This is a `const fn` so facades can hold their namespace as a constant.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a namespace from an owned string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered path segments identifying an endpoint inside a namespace.
///
/// Empty and whitespace-only segments are dropped on construction; the
/// remaining segments keep their input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceAddress {
    segments: Vec<String>,
}

impl ResourceAddress {
    /// Creates an address from segments, dropping blank ones.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments.into_iter().collect()
    }

    /// Creates an address from optional segments, dropping `None` and blank ones.
    pub fn from_optional<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        segments.into_iter().flatten().collect()
    }

    /// Returns the retained segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the segments joined with `/`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Returns `true` if no segment survived filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ResourceAddress {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let segments = iter
            .into_iter()
            .filter(|s| !s.as_ref().trim().is_empty())
            .map(|s| s.as_ref().to_string())
            .collect();
        Self { segments }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Builds `{host}/{namespace}/{resource}`.
///
/// Any path prefix on the host is kept. Segments are percent-encoded.
///
/// # Errors
///
/// Returns [`HttpError::InvalidArgument`] if the host cannot carry a path.
pub fn service_url(
    host: &HostUrl,
    namespace: &Namespace,
    resource: &ResourceAddress,
) -> Result<Url, HttpError> {
    let mut url = host.url().clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| HttpError::invalid_argument(format!("host '{host}' cannot be a base URL")))?;
        path.pop_if_empty();
        if !namespace.as_str().trim().is_empty() {
            path.push(namespace.as_str());
        }
        path.extend(resource.segments());
    }
    Ok(url)
}

/// Merges query parameters into `url` by key.
///
/// Existing keys are overwritten in place, new keys are appended, and keys
/// already in the URL but absent from `params` are kept.
///
/// ```rust
/// use url::Url;
/// use trulioo_client::clients::merge_query;
///
/// let mut url = Url::parse("https://api.example.com/x?foo=1").unwrap();
/// merge_query(&mut url, [("bar", "2")]);
/// assert_eq!(url.as_str(), "https://api.example.com/x?foo=1&bar=2");
///
/// merge_query(&mut url, [("foo", "9")]);
/// assert_eq!(url.as_str(), "https://api.example.com/x?foo=9&bar=2");
/// ```
pub fn merge_query<I, K, V>(url: &mut Url, params: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if !pairs.iter().any(|(k, _)| *k == key) {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    let mut changed = false;
    for (key, value) in params {
        changed = true;
        let (key, value) = (key.as_ref(), value.as_ref());
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    if !changed {
        return;
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Namespace>();
    assert_send_sync::<ResourceAddress>();
};
