//! Person fraud (risk) checks under `personfraud/v3`.

use tokio_util::sync::CancellationToken;

use crate::clients::{Context, HttpError, Namespace, ResourceAddress};
use crate::models::{
    Consent, CountrySubdivision, FieldMap, NormalizedDatasourceGroupCountry, RiskVerifyRequest,
    RiskVerifyResult, TestEntityDataFields,
};

const NAMESPACE: Namespace = Namespace::from_static("personfraud");
const VERSION: &str = "v3";

/// Person fraud checks and their configuration lookups.
#[derive(Clone, Copy, Debug)]
pub struct PersonFraud<'a> {
    context: &'a Context,
}

impl<'a> PersonFraud<'a> {
    pub(crate) const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Runs a fraud check.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn check(
        &self,
        request: &RiskVerifyRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<RiskVerifyResult, HttpError> {
        let resource = ResourceAddress::new([VERSION, "check"]);
        self.context.post(&NAMESPACE, &resource, Some(request), cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn datasources(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<NormalizedDatasourceGroupCountry>, HttpError> {
        self.configuration(["datasources", package_id, country_code], cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn test_entities(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<TestEntityDataFields>, HttpError> {
        self.configuration(["testentities", package_id, country_code], cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn country_subdivisions(
        &self,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<CountrySubdivision>, HttpError> {
        self.configuration(["countrysubdivisions", country_code], cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn country_codes(
        &self,
        package_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<String>, HttpError> {
        self.configuration(["countrycodes", package_id], cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn fields(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<FieldMap, HttpError> {
        self.configuration(["fields", package_id, country_code], cancel).await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn recommended_fields(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<FieldMap, HttpError> {
        self.configuration(["fields", package_id, country_code, "recommended"], cancel)
            .await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn detailed_consents(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Consent>, HttpError> {
        self.configuration(["consents", package_id, country_code, "detail"], cancel)
            .await
    }

    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn consents(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<String>, HttpError> {
        self.configuration(["consents", package_id, country_code], cancel).await
    }

    async fn configuration<T: serde::de::DeserializeOwned, const N: usize>(
        &self,
        segments: [&str; N],
        cancel: Option<&CancellationToken>,
    ) -> Result<T, HttpError> {
        let resource: ResourceAddress = [VERSION, "configuration"]
            .into_iter()
            .chain(segments)
            .collect();
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }
}
