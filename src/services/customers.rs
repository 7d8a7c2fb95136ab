//! Customer operations.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::{Customer, Metadata};
use crate::time::{Sleeper, TokioSleeper};

use super::{from_payload, to_param_map};

/// Parameters for creating a customer.
///
/// All fields are optional towards the SDK; the API enforces its own
/// required set and reports violations as validation errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCustomerParams {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Country code (e.g. `TR`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// District.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Metadata, transmitted as an ordered `[{key, value}]` list.
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl CreateCustomerParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Sets the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Customer operations.
pub struct Customers<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Customers<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Creates a customer (`POST /customers`).
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] with `is_validation_error()` for rejected fields
    /// - the usual transport and authentication failures
    pub async fn create(&self, params: CreateCustomerParams) -> Result<Customer, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(Method::POST, "customers", Some(&params), RequestKind::Regular)
            .await?;
        from_payload(payload)
    }
}
