//! Product operations.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::{Metadata, Product};
use crate::time::{Sleeper, TokioSleeper};

use super::{from_payload, to_param_map};

/// Parameters for creating a product. Prices are in minor currency units.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProductParams {
    /// Product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price in minor currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// Quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata, transmitted as an ordered `[{key, value}]` list.
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl CreateProductParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the price in minor currency units.
    #[must_use]
    pub const fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Product operations.
pub struct Products<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Products<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Creates a product (`POST /products`).
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] with `is_validation_error()` for rejected fields
    /// - the usual transport and authentication failures
    pub async fn create(&self, params: CreateProductParams) -> Result<Product, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(Method::POST, "products", Some(&params), RequestKind::Regular)
            .await?;
        from_payload(payload)
    }
}
