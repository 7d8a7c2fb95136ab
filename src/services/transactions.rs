//! Transaction operations: retrieval, refunds and pre-auth resolution.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::{Error, InvalidRequestError};
use crate::http::envelope::ErrorCode;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::{Refund, ResolvePreAuth, TransactionResult};
use crate::time::{Sleeper, TokioSleeper};

use super::{from_payload, to_param_map};

/// API error code the transaction endpoint uses for "not found".
const TRANSACTION_NOT_FOUND_CODE: i64 = 2004;

/// Parameters for refunding a transaction.
#[derive(Debug, Clone, Serialize)]
pub struct RefundParams {
    /// Transaction to refund.
    pub transaction_id: i64,
    /// Amount to refund in minor currency units; omit for a full refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Reason shown in the merchant panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RefundParams {
    /// Creates parameters for a full refund.
    #[must_use]
    pub const fn new(transaction_id: i64) -> Self {
        Self {
            transaction_id,
            amount: None,
            description: None,
        }
    }

    /// Sets a partial refund amount in minor currency units.
    #[must_use]
    pub const fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the refund description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Parameters for resolving a pre-authorization.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvePreAuthParams {
    /// Pre-authorized transaction to resolve.
    pub transaction_id: i64,
    /// Amount to capture in minor currency units; omit to capture the
    /// full hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl ResolvePreAuthParams {
    /// Creates parameters capturing the full hold.
    #[must_use]
    pub const fn new(transaction_id: i64) -> Self {
        Self {
            transaction_id,
            amount: None,
        }
    }

    /// Sets a partial capture amount in minor currency units.
    #[must_use]
    pub const fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Transaction operations.
pub struct Transactions<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Transactions<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Retrieves a transaction by id (`GET /transaction/{id}`).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] for an empty id (before any network
    ///   call) and for unknown transactions (HTTP 404 or API error code
    ///   2004), with the requested id in the message
    /// - the usual transport and authentication failures
    pub async fn retrieve(&self, transaction_id: impl std::fmt::Display) -> Result<TransactionResult, Error> {
        let id = transaction_id.to_string();
        if id.trim().is_empty() {
            return Err(InvalidRequestError::bad_input("Transaction ID is required").into());
        }

        let path = format!("transaction/{id}");
        let result = self
            .inner
            .request(Method::GET, &path, None, RequestKind::Regular)
            .await;

        match result {
            Ok(payload) => from_payload(payload),
            Err(Error::Api(e)) if has_not_found_code(e.error_code.as_ref()) => {
                Err(InvalidRequestError {
                    message: format!("Transaction not found: {id}"),
                    http_status: 404,
                    error_code: e.error_code,
                }
                .into())
            }
            Err(Error::InvalidRequest(e)) => Err(InvalidRequestError {
                message: format!("Transaction not found: {id}"),
                http_status: e.http_status,
                error_code: e.error_code,
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    /// Refunds a transaction (`POST /transaction/refund`).
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] when the refund is rejected
    /// - the usual transport and authentication failures
    pub async fn refund(&self, params: RefundParams) -> Result<Refund, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                "transaction/refund",
                Some(&params),
                RequestKind::Regular,
            )
            .await?;
        from_payload(payload)
    }

    /// Resolves a pre-authorization (`POST /transaction/resolve-pre-auth`).
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] when the resolution is rejected
    /// - the usual transport and authentication failures
    pub async fn resolve_pre_auth(
        &self,
        params: ResolvePreAuthParams,
    ) -> Result<ResolvePreAuth, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(
                Method::POST,
                "transaction/resolve-pre-auth",
                Some(&params),
                RequestKind::Regular,
            )
            .await?;
        from_payload(payload)
    }
}

fn has_not_found_code(code: Option<&ErrorCode>) -> bool {
    code.and_then(ErrorCode::as_i64) == Some(TRANSACTION_NOT_FOUND_CODE)
}
