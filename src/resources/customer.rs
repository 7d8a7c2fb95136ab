//! Customer resource.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::Metadata;

/// A customer record.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Customer id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Owning merchant id.
    #[serde(default)]
    pub merchant_id: Option<i64>,
    /// First name.
    #[serde(default)]
    pub name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Full name as rendered by the API.
    #[serde(default)]
    pub name_lastname: Option<String>,
    /// Phone country code (e.g. `+90`).
    #[serde(default)]
    pub phone_code: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Country code (e.g. `TR`).
    #[serde(default)]
    pub country: Option<String>,
    /// Country flag image URL.
    #[serde(default)]
    pub country_flag_url: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// District.
    #[serde(default)]
    pub district: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zip_code: Option<String>,
    /// Whether the customer was created implicitly by a payment.
    #[serde(default)]
    pub created_via_payment: Option<bool>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Human-readable creation date.
    #[serde(default)]
    pub formatted_created_at: Option<String>,
    /// Customer metadata.
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

impl Customer {
    /// The customer's full name, preferring the API-rendered form.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        if let Some(rendered) = &self.name_lastname {
            return Some(rendered.clone());
        }

        let joined = format!(
            "{} {}",
            self.name.as_deref().unwrap_or(""),
            self.lastname.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if joined.is_empty() {
            None
        } else {
            Some(joined.to_owned())
        }
    }

    /// The phone number with its country code, when a number is present.
    #[must_use]
    pub fn full_phone(&self) -> Option<String> {
        let phone = self.phone.as_deref()?;
        if phone.is_empty() {
            return None;
        }

        let code = self.phone_code.as_deref().unwrap_or("");
        Some(format!("{code} {phone}").trim().to_owned())
    }

    /// Looks up a metadata value by key.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }

    /// Whether the customer was created implicitly by a payment.
    #[must_use]
    pub fn was_created_via_payment(&self) -> bool {
        self.created_via_payment.unwrap_or(false)
    }
}
