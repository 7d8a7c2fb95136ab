//! BIN lookup resource.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Card details resolved from a BIN (bank identification number).
#[derive(Debug, Clone, Deserialize)]
pub struct BinLookup {
    /// Bank code.
    #[serde(default)]
    pub bank_code: Option<i64>,
    /// Bank name.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank image URL.
    #[serde(default)]
    pub bank_image: Option<String>,
    /// The queried BIN.
    #[serde(default)]
    pub bin_number: Option<String>,
    /// Domestic or international indicator.
    #[serde(default)]
    pub domestic_intl: Option<String>,
    /// Card brand (visa, mastercard, …).
    #[serde(default)]
    pub card_brand: Option<String>,
    /// Card brand image URL.
    #[serde(default)]
    pub card_brand_image_url: Option<String>,
    /// Card type (credit, debit).
    #[serde(default)]
    pub card_type: Option<String>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
