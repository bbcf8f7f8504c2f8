//! Know Your Business.
//!
//! Business search, business verification, business reports and the
//! configuration lookups specific to businesses. All endpoints live under
//! `kyb/v3`.
//!
//! # Registration numbers
//!
//! [`Kyb::business_registration_numbers`] narrows by country and then by
//! jurisdiction. A jurisdiction is meaningless without its country, so that
//! combination is rejected before anything is sent:
//!
//! ```rust,ignore
//! let all = client.kyb().business_registration_numbers(None, None, None).await?;
//! let canada = client.kyb().business_registration_numbers(Some("CA"), None, None).await?;
//! let bc = client.kyb().business_registration_numbers(Some("CA"), Some("BC"), None).await?;
//!
//! // HttpError::InvalidArgument, no request sent
//! let err = client.kyb().business_registration_numbers(None, Some("BC"), None).await;
//! ```

use std::io::Cursor;

use tokio_util::sync::CancellationToken;

use crate::clients::{Context, DownloadedDocument, HttpError, Namespace, QueryParams, ResourceAddress};
use crate::models::{
    BusinessRegistrationNumber, BusinessSearchRequest, BusinessSearchResponse, BusinessVerifyRequest,
    CountrySubdivision, FieldMap, TestEntityDataFields, VerifyResult, VerifyResultPartial,
};

const NAMESPACE: Namespace = Namespace::from_static("kyb");
const VERSION: &str = "v3";

/// Know Your Business operations.
#[derive(Clone, Copy, Debug)]
pub struct Kyb<'a> {
    context: &'a Context,
}

impl<'a> Kyb<'a> {
    pub(crate) const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Searches for businesses matching the request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn business_search(
        &self,
        request: &BusinessSearchRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<BusinessSearchResponse, HttpError> {
        let resource = ResourceAddress::new([VERSION, "business", "search"]);
        self.context.post(&NAMESPACE, &resource, Some(request), cancel).await
    }

    /// Verifies a business.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn business_verify(
        &self,
        request: &BusinessVerifyRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<VerifyResult, HttpError> {
        let resource = ResourceAddress::new([VERSION, "business", "verify"]);
        self.context.post(&NAMESPACE, &resource, Some(request), cancel).await
    }

    /// Fetches a stored business search.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn transaction_record(
        &self,
        transaction_record_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<BusinessSearchResponse, HttpError> {
        let resource = ResourceAddress::new([
            VERSION,
            "business",
            "search",
            "transactionrecord",
            transaction_record_id,
        ]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the business input fields for a country.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn fields(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<FieldMap, HttpError> {
        let resource = ResourceAddress::new([VERSION, "configuration", "fields", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Downloads the business report of a transaction record.
    ///
    /// With `additional_data`, the request carries `additionalData=true`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn business_report(
        &self,
        transaction_record_id: &str,
        additional_data: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<DownloadedDocument, HttpError> {
        let resource = report_resource(transaction_record_id);
        let query = report_query(additional_data);
        self.context
            .get_with(&NAMESPACE, &resource, Some(&query), DownloadedDocument::from_response, cancel)
            .await
    }

    /// Reads the business report as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn business_report_stream(
        &self,
        transaction_record_id: &str,
        additional_data: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<Cursor<Vec<u8>>, HttpError> {
        let resource = report_resource(transaction_record_id);
        let query = report_query(additional_data);
        self.context.get_stream(&NAMESPACE, &resource, Some(&query), cancel).await
    }

    /// Returns the country codes enabled for a package.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn country_codes(
        &self,
        package_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<String>, HttpError> {
        let resource = ResourceAddress::new([VERSION, "configuration", "countrycodes", package_id]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns jurisdictions of incorporation, for one country or for all.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn country_joi(
        &self,
        country_code: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<CountrySubdivision>, HttpError> {
        let resource = ResourceAddress::from_optional([
            Some(VERSION),
            Some("business"),
            Some("countryJOI"),
            country_code,
        ]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns sample businesses that match in the test environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn test_entities(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<TestEntityDataFields>, HttpError> {
        let resource =
            ResourceAddress::new([VERSION, "configuration", "testentities", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns registration number formats, optionally narrowed by country
    /// and jurisdiction.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidArgument`] when a jurisdiction is given
    /// without a country. No request is sent in that case.
    pub async fn business_registration_numbers(
        &self,
        country_code: Option<&str>,
        jurisdiction_code: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<BusinessRegistrationNumber>, HttpError> {
        if is_blank(country_code) && !is_blank(jurisdiction_code) {
            return Err(HttpError::invalid_argument(
                "Cannot use jurisdiction without a country.",
            ));
        }

        let resource = ResourceAddress::from_optional([
            Some(VERSION),
            Some("business"),
            Some("businessregistrationnumbers"),
            country_code,
            jurisdiction_code,
        ]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Fetches what an asynchronous business verification has produced so far.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn partial_result(
        &self,
        transaction_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<VerifyResultPartial, HttpError> {
        let resource = ResourceAddress::new([
            VERSION,
            "verifications",
            "transaction",
            transaction_id,
            "partialresult",
        ]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Reads a document attached to a transaction record as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn document_download_stream(
        &self,
        transaction_record_id: &str,
        field_name: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Cursor<Vec<u8>>, HttpError> {
        let resource = document_resource(transaction_record_id, field_name);
        self.context.get_stream(&NAMESPACE, &resource, None, cancel).await
    }

    /// Downloads a document attached to a transaction record.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn document_download(
        &self,
        transaction_record_id: &str,
        field_name: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<DownloadedDocument, HttpError> {
        let resource = document_resource(transaction_record_id, field_name);
        self.context
            .get_with(&NAMESPACE, &resource, None, DownloadedDocument::from_response, cancel)
            .await
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn report_resource(transaction_record_id: &str) -> ResourceAddress {
    ResourceAddress::new([VERSION, "business", "report", transaction_record_id])
}

fn report_query(additional_data: bool) -> QueryParams {
    let mut query = QueryParams::new();
    if additional_data {
        query.insert("additionalData".to_string(), "true".to_string());
    }
    query
}

fn document_resource(transaction_record_id: &str, field_name: &str) -> ResourceAddress {
    ResourceAddress::new([
        VERSION,
        "verifications",
        "documentdownload",
        transaction_record_id,
        field_name,
    ])
}
