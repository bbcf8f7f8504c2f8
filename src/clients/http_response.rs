//! HTTP response helpers for the Trulioo API client.
//!
//! This module provides [`DownloadedDocument`], the result of the document
//! and report download endpoints, and the `Content-Disposition` parsing it
//! relies on.

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Response;

use crate::clients::classifier::classify;
use crate::clients::errors::HttpError;

/// File name used when the response does not name the document.
pub const DEFAULT_DOCUMENT_NAME: &str = "downloadDocument.pdf";

/// A downloaded file: its name and raw bytes.
///
/// # Example
///
/// ```rust
/// use trulioo_client::clients::DownloadedDocument;
///
/// let doc = DownloadedDocument::new("report.pdf", b"%PDF-1.7".to_vec());
/// assert_eq!(doc.name, "report.pdf");
/// assert_eq!(doc.len(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedDocument {
    /// The file name from `Content-Disposition`, or `downloadDocument.pdf`.
    pub name: String,
    /// The document bytes.
    pub content: Vec<u8>,
}

impl DownloadedDocument {
    /// Creates a document from a name and its bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the document has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Reads a successful response into a document.
    ///
    /// Usable as a response processor with
    /// [`Context::get_with`](crate::clients::Context::get_with).
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] for a non-2xx response, or
    /// [`HttpError::Network`] if the body cannot be read.
    pub async fn from_response(response: Response) -> Result<Self, HttpError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(classify(status, &body));
        }

        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
            .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string());

        let content = response.bytes().await?.to_vec();
        tracing::debug!(name = %name, bytes = content.len(), "document downloaded");

        Ok(Self { name, content })
    }
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// The plain `filename` parameter wins; `filename*` (RFC 5987) is used when
/// it is the only one present. Surrounding quotes are removed.
///
/// ```rust
/// use trulioo_client::clients::content_disposition_filename;
///
/// assert_eq!(
///     content_disposition_filename(r#"attachment; filename="report.pdf""#).as_deref(),
///     Some("report.pdf")
/// );
/// assert_eq!(
///     content_disposition_filename("attachment; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf").as_deref(),
///     Some("résumé.pdf")
/// );
/// assert_eq!(content_disposition_filename("inline"), None);
/// ```
#[must_use]
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(unquote(value).to_string()),
            "filename*" => extended = decode_extended(value),
            _ => {}
        }
    }

    plain.or(extended).filter(|name| !name.trim().is_empty())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

// charset'language'percent-encoded
fn decode_extended(value: &str) -> Option<String> {
    let encoded = value.splitn(3, '\'').nth(2)?;
    urlencoding::decode(unquote(encoded))
        .ok()
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="business-report.pdf""#),
            Some("business-report.pdf".to_string())
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            content_disposition_filename("attachment; filename=doc.pdf"),
            Some("doc.pdf".to_string())
        );
    }

    #[test]
    fn test_plain_filename_preferred_over_extended() {
        assert_eq!(
            content_disposition_filename(
                "attachment; filename=\"plain.pdf\"; filename*=UTF-8''fancy.pdf"
            ),
            Some("plain.pdf".to_string())
        );
    }

    #[test]
    fn test_extended_filename_is_decoded() {
        assert_eq!(
            content_disposition_filename("attachment; filename*=UTF-8''my%20report.pdf"),
            Some("my report.pdf".to_string())
        );
    }

    #[test]
    fn test_missing_or_blank_filename() {
        assert_eq!(content_disposition_filename("attachment"), None);
        assert_eq!(content_disposition_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_document_accessors() {
        let doc = DownloadedDocument::new(DEFAULT_DOCUMENT_NAME, Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.name, "downloadDocument.pdf");
    }
}
