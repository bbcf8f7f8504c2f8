//! Business search and registration number types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FieldMap, Location, ServiceError, VerifyRequest};

/// A business verification uses the same shape as a person verification,
/// with [`DataFields::business`](super::DataFields::business) populated.
pub type BusinessVerifyRequest = VerifyRequest;

/// Search for businesses matching a name or registration number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessSearchRequest {
    #[serde(default)]
    pub accept_trulioo_terms_and_conditions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(default)]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessSearchModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consent_for_data_sources: Vec<String>,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessSearchModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_of_incorporation: Option<String>,
    #[serde(default, rename = "DUNSNumber", skip_serializing_if = "Option::is_none")]
    pub duns_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessSearchResponse {
    #[serde(default, rename = "TransactionID", alias = "TransactionId")]
    pub transaction_id: String,
    #[serde(
        default,
        with = "super::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_dt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<BusinessRecord>,
    #[serde(
        default,
        rename = "CustomerReferenceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessRecord {
    #[serde(default, rename = "TransactionRecordID", alias = "TransactionRecordId")]
    pub transaction_record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_status: Option<String>,
    #[serde(default)]
    pub datasource_results: Vec<BusinessSearchResult>,
    #[serde(default)]
    pub errors: Vec<ServiceError>,
}

/// Matches from a single datasource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessSearchResult {
    #[serde(default)]
    pub datasource_name: String,
    #[serde(default)]
    pub results: Vec<BusinessResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_of_incorporation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_status: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

/// A registration number format accepted for a country or jurisdiction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessRegistrationNumber {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input mask, for example `###-###-###`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_code: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}
