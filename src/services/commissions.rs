//! Commission queries.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::Commission;
use crate::time::{Sleeper, TokioSleeper};

use super::{from_payload, to_param_map};

/// Filters for the commission search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommissionSearchParams {
    /// Restrict to one merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<i64>,
    /// Restrict to one card family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_family_id: Option<i64>,
    /// Restrict to one installment count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<i64>,
}

impl CommissionSearchParams {
    /// Creates an unfiltered search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one merchant.
    #[must_use]
    pub const fn with_merchant_id(mut self, merchant_id: i64) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    /// Restricts to one card family.
    #[must_use]
    pub const fn with_card_family_id(mut self, card_family_id: i64) -> Self {
        self.card_family_id = Some(card_family_id);
        self
    }

    /// Restricts to one installment count.
    #[must_use]
    pub const fn with_installment(mut self, installment: i64) -> Self {
        self.installment = Some(installment);
        self
    }
}

/// Commission operations.
pub struct Commissions<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Commissions<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Searches commission schedules (`GET /pos/commissions`).
    ///
    /// # Errors
    ///
    /// The usual transport and authentication failures.
    pub async fn search(&self, params: CommissionSearchParams) -> Result<Commission, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(
                Method::GET,
                "pos/commissions",
                Some(&params),
                RequestKind::Regular,
            )
            .await?;
        from_payload(payload)
    }
}
