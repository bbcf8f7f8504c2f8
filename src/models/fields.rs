//! Input data groups sent with verification requests.
//!
//! Each group names the fields the API documents for every country and keeps
//! everything else in `additional_fields`, so country-specific or newer
//! fields survive a read-modify-write cycle.

use serde::{Deserialize, Serialize};

use super::FieldMap;

/// All input data for one verification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_info: Option<PersonInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication: Option<Communication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_licence: Option<DriverLicence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_ids: Option<Vec<NationalId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<Passport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    /// Risk monitoring settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<FieldMap>,
    /// Fields keyed by country code, then by field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_specific: Option<FieldMap>,
}

/// A sample entity usable against the test environment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestEntityDataFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_entity_name: Option<String>,
    #[serde(flatten)]
    pub data_fields: DataFields,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_sur_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, rename = "POBox", skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Communication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriverLicence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_expiry: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_expiry: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_expiry: Option<i32>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NationalId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Id type, for example `NationalID` or `SocialService`.
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_of_issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_of_issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_of_issue: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrz1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrz2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_expiry: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_expiry: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_expiry: Option<i32>,
}

/// Identity document images, base64 encoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_front_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_back_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Business {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_incorporation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_incorporation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_incorporation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_of_incorporation: Option<String>,
    #[serde(default, rename = "DUNSNumber", skip_serializing_if = "Option::is_none")]
    pub duns_number: Option<String>,
    #[serde(flatten)]
    pub additional_fields: FieldMap,
}
