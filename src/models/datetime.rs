//! Serde helpers for API timestamps.
//!
//! The API is not consistent about offsets: some timestamps carry `Z`, some
//! carry an explicit offset, and some carry none at all. Offset-less values
//! are read as UTC. Everything is written back as RFC 3339 in UTC.
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Stamped {
//!     #[serde(with = "trulioo_client::models::datetime")]
//!     at: DateTime<Utc>,
//! }
//!
//! let parsed: Stamped = serde_json::from_str(r#"{"at":"2024-03-01T10:15:00"}"#).unwrap();
//! assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"at":"2024-03-01T10:15:00Z"}"#);
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp, or an offset-less one as UTC.
#[must_use]
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats a timestamp as RFC 3339 with a `Z` suffix.
#[must_use]
pub fn format_utc(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serializes a timestamp as UTC RFC 3339.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_utc(value))
}

/// Deserializes a timestamp, reading offset-less values as UTC.
///
/// # Errors
///
/// Fails if the value is not a recognizable timestamp.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_utc(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// The same conversions for `Option<DateTime<Utc>>`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional timestamp; `None` becomes `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp; `null` and `""` become `None`.
    ///
    /// # Errors
    ///
    /// Fails if a non-empty value is not a recognizable timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_utc(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_offsetless_timestamp_is_utc() {
        let parsed = parse_utc("2021-06-15T08:30:00.123").unwrap();
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let parsed = parse_utc("2021-06-15T08:30:00-07:00").unwrap();
        assert_eq!(parsed.hour(), 15);
        assert_eq!(parsed.day(), 15);
    }

    #[test]
    fn test_space_separated_timestamp() {
        assert!(parse_utc("2021-06-15 08:30:00").is_some());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_utc("yesterday").is_none());
    }

    #[test]
    fn test_format_uses_z_suffix() {
        let parsed = parse_utc("2021-06-15T08:30:00+00:00").unwrap();
        assert_eq!(format_utc(&parsed), "2021-06-15T08:30:00Z");
    }
}
