//! Maps failed HTTP responses onto the [`HttpError`] taxonomy.
//!
//! The body of a failed response is first read as an [`ErrorEnvelope`]. When
//! that is not possible an envelope is synthesized from the status code and
//! the raw body, so every classified error carries a message and a code.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::clients::errors::{HttpError, RequestError};

/// Error payload returned by the API on failure.
///
/// Field names are matched in either PascalCase or camelCase.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Server error code.
    #[serde(rename = "Code", alias = "code", default)]
    pub code: Option<i32>,
    /// Human-readable message.
    #[serde(rename = "Message", alias = "message", default)]
    pub message: Option<String>,
    /// Optional machine-oriented detail.
    #[serde(rename = "Reason", alias = "reason", default)]
    pub reason: Option<String>,
}

impl ErrorEnvelope {
    /// Parses a failure body, synthesizing an envelope when the body is not
    /// a usable error object.
    ///
    /// A body that parses but carries neither a code nor a message counts as
    /// empty. Only a genuine parse failure records a `reason`.
    #[must_use]
    pub fn parse(status: StatusCode, body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::synthesize(status, body, None);
        }

        match serde_json::from_str::<Option<Self>>(body) {
            Ok(Some(envelope)) if envelope.code.is_some() || envelope.message.is_some() => {
                envelope
            }
            Ok(_) => Self::synthesize(status, body, None),
            Err(e) => Self::synthesize(status, body, Some(e.to_string())),
        }
    }

    fn synthesize(status: StatusCode, body: &str, reason: Option<String>) -> Self {
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), str::to_string)
        } else {
            body.to_string()
        };

        Self {
            code: Some(i32::from(status.as_u16())),
            message: Some(message),
            reason,
        }
    }

    fn into_request_error(self, status: StatusCode) -> RequestError {
        RequestError {
            status: status.as_u16(),
            code: self.code.unwrap_or_else(|| i32::from(status.as_u16())),
            message: self.message.unwrap_or_default(),
            reason: self.reason,
        }
    }
}

/// Classifies a non-successful response into an [`HttpError`].
///
/// | Status | Variant |
/// |---|---|
/// | 400 | [`HttpError::BadRequest`] |
/// | 401 | [`HttpError::AuthenticationFailure`] |
/// | 403 | [`HttpError::AccessDenied`] |
/// | 404 | [`HttpError::ResourceNotFound`] |
/// | 500 | [`HttpError::InternalServerError`] |
/// | other | [`HttpError::Request`] |
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use trulioo_client::clients::{classify, HttpError};
///
/// let error = classify(StatusCode::UNAUTHORIZED, r#"{"Code":1001,"Message":"bad creds"}"#);
/// match error {
///     HttpError::AuthenticationFailure(e) => {
///         assert_eq!(e.code, 1001);
///         assert_eq!(e.message, "bad creds");
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[must_use]
pub fn classify(status: StatusCode, body: &str) -> HttpError {
    let error = ErrorEnvelope::parse(status, body).into_request_error(status);

    match status {
        StatusCode::BAD_REQUEST => HttpError::BadRequest(error),
        StatusCode::UNAUTHORIZED => HttpError::AuthenticationFailure(error),
        StatusCode::FORBIDDEN => HttpError::AccessDenied(error),
        StatusCode::NOT_FOUND => HttpError::ResourceNotFound(error),
        StatusCode::INTERNAL_SERVER_ERROR => HttpError::InternalServerError(error),
        _ => HttpError::Request(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_map_to_error_kinds() {
        let body = r#"{"Code":1,"Message":"m"}"#;
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, body),
            HttpError::BadRequest(_)
        ));
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, body),
            HttpError::AuthenticationFailure(_)
        ));
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, body),
            HttpError::AccessDenied(_)
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, body),
            HttpError::ResourceNotFound(_)
        ));
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, body),
            HttpError::InternalServerError(_)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_GATEWAY, body),
            HttpError::Request(_)
        ));
        assert!(matches!(
            classify(StatusCode::TOO_MANY_REQUESTS, body),
            HttpError::Request(_)
        ));
    }

    #[test]
    fn test_envelope_fields_are_carried() {
        let error = classify(
            StatusCode::UNAUTHORIZED,
            r#"{"Code":1001,"Message":"bad creds","Reason":"expired"}"#,
        );
        let details = error.request_error().unwrap();
        assert_eq!(details.status, 401);
        assert_eq!(details.code, 1001);
        assert_eq!(details.message, "bad creds");
        assert_eq!(details.reason.as_deref(), Some("expired"));
    }

    #[test]
    fn test_camel_case_envelope_is_accepted() {
        let envelope = ErrorEnvelope::parse(
            StatusCode::BAD_REQUEST,
            r#"{"code":2001,"message":"missing field"}"#,
        );
        assert_eq!(envelope.code, Some(2001));
        assert_eq!(envelope.message.as_deref(), Some("missing field"));
    }

    #[test]
    fn test_non_json_body_records_parse_reason() {
        let envelope = ErrorEnvelope::parse(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert_eq!(envelope.code, Some(502));
        assert_eq!(envelope.message.as_deref(), Some("<html>upstream down</html>"));
        assert!(envelope.reason.is_some());
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let envelope = ErrorEnvelope::parse(StatusCode::NOT_FOUND, "");
        assert_eq!(envelope.code, Some(404));
        assert_eq!(envelope.message.as_deref(), Some("Not Found"));
        assert!(envelope.reason.is_none());
    }

    #[test]
    fn test_null_and_empty_objects_are_synthesized_without_reason() {
        let from_null = ErrorEnvelope::parse(StatusCode::FORBIDDEN, "null");
        assert_eq!(from_null.code, Some(403));
        assert_eq!(from_null.message.as_deref(), Some("null"));
        assert!(from_null.reason.is_none());

        let from_empty = ErrorEnvelope::parse(StatusCode::FORBIDDEN, "{}");
        assert_eq!(from_empty.code, Some(403));
        assert_eq!(from_empty.message.as_deref(), Some("{}"));
        assert!(from_empty.reason.is_none());
    }

    #[test]
    fn test_message_without_code_falls_back_to_status() {
        let error = classify(StatusCode::BAD_REQUEST, r#"{"Message":"nope"}"#);
        let details = error.request_error().unwrap();
        assert_eq!(details.code, 400);
        assert_eq!(details.message, "nope");
    }
}
