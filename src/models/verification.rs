//! Identity verification requests and results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DataFields;

/// A request to verify one person or business.
///
/// # Example
///
/// ```rust
/// use trulioo_client::models::{DataFields, PersonInfo, VerifyRequest};
///
/// let request = VerifyRequest {
///     accept_trulioo_terms_and_conditions: true,
///     country_code: "CA".to_string(),
///     data_fields: DataFields {
///         person_info: Some(PersonInfo {
///             first_given_name: Some("John".to_string()),
///             ..PersonInfo::default()
///         }),
///         ..DataFields::default()
///     },
///     ..VerifyRequest::default()
/// };
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["CountryCode"], "CA");
/// assert_eq!(json["DataFields"]["PersonInfo"]["FirstGivenName"], "John");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub accept_trulioo_terms_and_conditions: bool,
    #[serde(default)]
    pub cleansed_address: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consent_for_data_sources: Vec<String>,
    #[serde(default)]
    pub country_code: String,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
    #[serde(default)]
    pub data_fields: DataFields,
    #[serde(default)]
    pub verbose_mode: bool,
    /// Receives the result when set, making the verification asynchronous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_back_url: Option<String>,
    /// Seconds to wait before the transaction times out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// The outcome of a verification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyResult {
    #[serde(default, rename = "TransactionID", alias = "TransactionId")]
    pub transaction_id: String,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_dt: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_dt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
}

/// The partial result of an asynchronous transaction.
pub type VerifyResultPartial = VerifyResult;

/// Per-transaction record of datasource outcomes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(default, rename = "TransactionRecordID", alias = "TransactionRecordId")]
    pub transaction_record_id: String,
    /// `match`, `nomatch` or `missing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasource_results: Vec<DatasourceResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RecordRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// What one datasource said about the input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasourceResult {
    #[serde(default)]
    pub datasource_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasource_fields: Vec<DatasourceField>,
    /// Values the datasource returned that were not part of the input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appended_fields: Vec<AppendedField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_groups: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasourceField {
    #[serde(default)]
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_group: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppendedField {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub data: String,
}

/// An error reported inside an otherwise successful response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single input field echoed back in a transaction record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataField {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub value: String,
}

/// A stored transaction, including the input it was run with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRecordResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_fields: Vec<DataField>,
    #[serde(default, rename = "TransactionID", alias = "TransactionId")]
    pub transaction_id: String,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_dt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
}

/// Progress of an asynchronous transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionStatus {
    #[serde(default, alias = "TransactionID")]
    pub transaction_id: String,
    #[serde(default, alias = "TransactionRecordID", skip_serializing_if = "Option::is_none")]
    pub transaction_record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_timed_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_result() -> serde_json::Value {
        json!({
            "TransactionID": "b0a2f2a2-5d4f-4a2e-9b7e-1c1d1e1f1a1b",
            "UploadedDt": "2024-01-02T03:04:05Z",
            "CountryCode": "US",
            "ProductName": "Identity Verification",
            "Record": {
                "TransactionRecordID": "c1c2c3c4",
                "RecordStatus": "match",
                "DatasourceResults": [{
                    "DatasourceName": "Credit Agency",
                    "DatasourceFields": [{"FieldName": "FirstGivenName", "Status": "match"}],
                    "AppendedFields": [{"FieldName": "FirstName", "Data": "John"}]
                }]
            }
        })
    }

    #[test]
    fn test_verify_result_keeps_appended_fields() {
        let result: VerifyResult = serde_json::from_value(sample_result()).unwrap();
        let record = result.record.as_ref().unwrap();
        let appended = &record.datasource_results[0].appended_fields[0];
        assert_eq!(appended.field_name, "FirstName");
        assert_eq!(appended.data, "John");

        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back, sample_result());
    }

    #[test]
    fn test_uploaded_dt_without_offset_is_utc() {
        let result: VerifyResult =
            serde_json::from_value(json!({"TransactionID": "t", "UploadedDt": "2024-01-02T03:04:05"}))
                .unwrap();
        assert_eq!(
            result.uploaded_dt.unwrap().to_rfc3339(),
            "2024-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_transaction_status_accepts_either_id_casing() {
        let status: TransactionStatus = serde_json::from_value(json!({
            "TransactionId": "t1",
            "TransactionRecordID": "r1",
            "Status": "Completed",
            "IsTimedOut": false
        }))
        .unwrap();
        assert_eq!(status.transaction_id, "t1");
        assert_eq!(status.transaction_record_id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_partial_payload_deserializes() {
        let result: VerifyResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.record.is_none());
        assert!(result.errors.is_empty());
    }
}
