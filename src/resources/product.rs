//! Product resource.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::Metadata;

/// A product record. Prices are in minor currency units (kuruş/cents).
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Product id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Owning merchant id.
    #[serde(default)]
    pub merchant_id: Option<i64>,
    /// Product name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Price in minor currency units.
    #[serde(default)]
    pub price: Option<i64>,
    /// Currency code (TRY, USD, EUR).
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Quantity.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Product image URL.
    #[serde(default)]
    pub product_image: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Human-readable price (e.g. `"99,99"`).
    #[serde(default)]
    pub formatted_price: Option<String>,
    /// Human-readable creation date.
    #[serde(default)]
    pub formatted_created_at: Option<String>,
    /// System id.
    #[serde(default)]
    pub system_id: Option<i64>,
    /// Product metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Hosted payment link, when available.
    #[serde(default)]
    pub payment_link: Option<String>,
    /// Activity timeline.
    #[serde(default)]
    pub timeline: Option<Value>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Product {
    /// Price in decimal major units (e.g. 9999 → 99.99).
    #[must_use]
    pub fn price_decimal(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let minor = self.price.unwrap_or(0) as f64;
        minor / 100.0
    }

    /// Looks up a metadata value by key.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }
}
