//! Account configuration lookups.
//!
//! These calls describe what the account may verify: the countries enabled
//! for a package, the fields and consents each country needs, and the
//! datasources behind it. They are typically used to build input forms.

use tokio_util::sync::CancellationToken;

use crate::clients::{Context, HttpError, Namespace, ResourceAddress};
use crate::models::{
    Consent, CountrySubdivision, FieldMap, NormalizedDatasourceGroupCountry,
    NormalizedDatasourceGroupsWithCountry, TestEntityDataFields,
};

const NAMESPACE: Namespace = Namespace::from_static("configuration");

/// Account configuration lookups.
#[derive(Clone, Copy, Debug)]
pub struct Configuration<'a> {
    context: &'a Context,
}

impl<'a> Configuration<'a> {
    pub(crate) const fn new(context: &'a Context) -> Self {
        Self { context }
    }

    /// Returns the consent names that `ConsentForDataSources` must carry
    /// for `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn consents(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<String>, HttpError> {
        let resource = ResourceAddress::new(["consents", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the consents with their display text and links.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn detailed_consents(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Consent>, HttpError> {
        let resource = ResourceAddress::new(["consents", package_id, country_code, "detail"]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
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
        let resource = ResourceAddress::new(["countrycodes", package_id]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the provinces or states of a country.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn country_subdivisions(
        &self,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<CountrySubdivision>, HttpError> {
        let resource = ResourceAddress::new(["countrysubdivisions", country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the JSON schema of the input fields for a country.
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
        let resource = ResourceAddress::new(["fields", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the recommended subset of [`fields`](Self::fields).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn recommended_fields(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<FieldMap, HttpError> {
        let resource = ResourceAddress::new(["fields", package_id, country_code, "recommended"]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns sample entities that match in the test environment.
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
        let resource = ResourceAddress::new(["testentities", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the datasource groups configured for a country.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn datasources(
        &self,
        package_id: &str,
        country_code: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<NormalizedDatasourceGroupCountry>, HttpError> {
        let resource = ResourceAddress::new(["datasources", package_id, country_code]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }

    /// Returns the datasource groups of every country enabled for a package.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn all_datasources(
        &self,
        package_id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<NormalizedDatasourceGroupsWithCountry>, HttpError> {
        let resource = ResourceAddress::new(["alldatasources", package_id]);
        self.context.get(&NAMESPACE, &resource, None, cancel).await
    }
}
