//! Person fraud (risk) check types.
//!
//! The risk signal groups (email, phone, IP, features, reference) change
//! shape often, so they are exposed as open [`FieldMap`]s; only the score is
//! typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DataFields, FieldMap, ServiceError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RiskVerifyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_back_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub cleansed_address: bool,
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
    #[serde(default, rename = "BatchRecordID", skip_serializing_if = "Option::is_none")]
    pub batch_record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_metadata: Vec<RequestMetadata>,
}

/// Where the applicant came from, for example `Channel: "web"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestMetadata {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RiskVerifyResult {
    #[serde(default, alias = "TransactionID")]
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
    pub record: Option<RiskRecordResult>,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RiskRecordResult {
    #[serde(default, alias = "TransactionRecordID")]
    pub transaction_record_id: String,
    #[serde(default, rename = "UserID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<NormalizedRiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<FieldMap>,
    #[serde(default, rename = "IP", skip_serializing_if = "Option::is_none")]
    pub ip: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<FieldMap>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedRiskScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_codes: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_risk_result_parses() {
        let result: RiskVerifyResult = serde_json::from_value(json!({
            "TransactionId": "t1",
            "UploadedDt": "2024-05-06T07:08:09.5",
            "Record": {
                "TransactionRecordId": "r1",
                "UserID": "u1",
                "Score": {"ScoreType": "Fraud", "RiskLevel": "Low", "Score": 12},
                "IP": {"IPInfo": {"ISPName": "Example ISP"}}
            }
        }))
        .unwrap();

        let record = result.record.unwrap();
        assert_eq!(record.user_id.as_deref(), Some("u1"));
        assert_eq!(record.score.unwrap().score, Some(12));
        assert_eq!(record.ip.unwrap()["IPInfo"]["ISPName"], "Example ISP");
        assert!(result.uploaded_dt.is_some());
    }

    #[test]
    fn test_request_metadata_serializes() {
        let request = RiskVerifyRequest {
            country_code: "US".to_string(),
            request_metadata: vec![RequestMetadata {
                channel: "web".to_string(),
                value: "signup".to_string(),
            }],
            ..RiskVerifyRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["RequestMetadata"][0]["Channel"], "web");
        assert_eq!(value["CleansedAddress"], false);
    }
}
