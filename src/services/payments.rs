//! Payment operations.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::{Metadata, Payment};
use crate::time::{Sleeper, TokioSleeper};

use super::{as_json_string, from_payload, to_param_map};

/// A line item attached to a payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentProduct {
    /// Product name shown on the payment page.
    pub product_name: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PaymentProduct {
    /// Creates a line item with the required fields.
    #[must_use]
    pub fn new(product_name: impl Into<String>, price: i64) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            quantity: None,
            description: None,
        }
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
}

/// Parameters for creating a 3DS payment. Amounts are in minor currency
/// units.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentParams {
    /// Amount in minor currency units.
    pub amount: i64,
    /// Currency code (TRY, USD, EUR).
    pub currency: String,
    /// URL the customer returns to after the 3DS flow.
    pub redirect_url: String,
    /// Line items; transmitted as a JSON-encoded string in the form body.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "as_json_string"
    )]
    pub products: Vec<PaymentProduct>,
    /// Metadata, transmitted as an ordered `[{key, value}]` list.
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl CreatePaymentParams {
    /// Creates parameters with the required fields.
    #[must_use]
    pub fn new(amount: i64, currency: impl Into<String>, redirect_url: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            redirect_url: redirect_url.into(),
            products: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Appends a line item.
    #[must_use]
    pub fn with_product(mut self, product: PaymentProduct) -> Self {
        self.products.push(product);
        self
    }

    /// Sets the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Payment operations.
pub struct Payments<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Payments<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Creates a 3-D Secure payment (`POST /payment/3ds`).
    ///
    /// On success the returned [`Payment`] carries the hosted payment
    /// page URL to redirect the customer to, and the transaction id to
    /// poll afterwards.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] with `is_validation_error()` for rejected fields
    /// - the usual transport and authentication failures
    pub async fn create_3ds(&self, params: CreatePaymentParams) -> Result<Payment, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                "payment/3ds",
                Some(&params),
                RequestKind::Regular,
            )
            .await?;
        from_payload(payload)
    }

    /// Alias for [`create_3ds`](Self::create_3ds).
    ///
    /// # Errors
    ///
    /// Same as [`create_3ds`](Self::create_3ds).
    pub async fn create(&self, params: CreatePaymentParams) -> Result<Payment, Error> {
        self.create_3ds(params).await
    }
}
