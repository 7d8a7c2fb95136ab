//! Access token resource returned by the token-issuance endpoint.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Token issuance result: the bearer token plus merchant capability flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    /// The bearer token for subsequent requests.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Whether 3-D Secure payments are enabled for the merchant.
    #[serde(default)]
    pub supports_3d: Option<bool>,

    /// Whether 2-D payments are enabled.
    #[serde(default)]
    pub supports_2d: Option<bool>,

    /// Whether white-label payment pages are enabled.
    #[serde(default)]
    pub supports_white_label: Option<bool>,

    /// Whether installments are enabled.
    #[serde(default)]
    pub supports_installment: Option<bool>,

    /// Token expiry timestamp.
    #[serde(default)]
    pub expires_at: Option<String>,

    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
