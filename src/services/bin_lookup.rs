//! BIN lookup operations.

use http::Method;
use serde::Serialize;

use crate::auth::RequestKind;
use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::BinLookup;
use crate::time::{Sleeper, TokioSleeper};

use super::{from_payload, to_param_map};

/// Parameters for a BIN lookup.
#[derive(Debug, Clone, Serialize)]
pub struct BinLookupParams {
    /// The BIN (first 6–8 digits of the card number).
    pub bin_number: String,
}

impl BinLookupParams {
    /// Creates parameters for the given BIN.
    #[must_use]
    pub fn new(bin_number: impl Into<String>) -> Self {
        Self {
            bin_number: bin_number.into(),
        }
    }
}

/// BIN lookup operations.
pub struct BinLookups<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> BinLookups<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Resolves card details for a BIN (`GET /bin-lookup`).
    ///
    /// # Errors
    ///
    /// The usual transport and authentication failures.
    pub async fn detail(&self, params: BinLookupParams) -> Result<BinLookup, Error> {
        let params = to_param_map(&params)?;
        let payload = self
            .inner
            .request(Method::GET, "bin-lookup", Some(&params), RequestKind::Regular)
            .await?;
        from_payload(payload)
    }
}
