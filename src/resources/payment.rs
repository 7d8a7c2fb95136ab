//! Payment creation result.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Result of creating a 3DS payment: where to send the customer, and the
/// transaction to poll afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    /// Hosted payment page the customer must be redirected to.
    #[serde(default)]
    pub payment_page_url: Option<String>,
    /// Transaction id for later retrieval.
    #[serde(default)]
    pub transaction_id: Option<i64>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
