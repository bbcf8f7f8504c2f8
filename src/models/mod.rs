//! Request and response types for the Trulioo API.
//!
//! All types serialize with the API's PascalCase field names. Optional fields
//! default when absent, so partial server payloads deserialize, and are
//! skipped when `None`, so requests only carry what the caller set.
//!
//! Timestamps are `chrono::DateTime<Utc>`; see [`datetime`] for how
//! offset-less values are read.

pub mod datetime;

mod business;
mod configuration;
mod fields;
mod person_fraud;
mod verification;

use std::collections::HashMap;

/// An open JSON object, used for field descriptions and free-form groups.
pub type FieldMap = HashMap<String, serde_json::Value>;

pub use business::{
    BusinessRecord, BusinessRegistrationNumber, BusinessResult, BusinessSearchModel,
    BusinessSearchRequest, BusinessSearchResponse, BusinessSearchResult, BusinessVerifyRequest,
};
pub use configuration::{
    Consent, CountrySubdivision, DatasourceFieldDescription, NormalizedDatasource,
    NormalizedDatasourceGroupCountry, NormalizedDatasourceGroupsWithCountry,
};
pub use fields::{
    Business, Communication, DataFields, Document, DriverLicence, Location, NationalId, Passport,
    PersonInfo, TestEntityDataFields,
};
pub use person_fraud::{
    NormalizedRiskScore, RequestMetadata, RiskRecordResult, RiskVerifyRequest, RiskVerifyResult,
};
pub use verification::{
    AppendedField, DataField, DatasourceField, DatasourceResult, Record, RecordRule, ServiceError,
    TransactionRecordResult, TransactionStatus, VerifyRequest, VerifyResult, VerifyResultPartial,
};
