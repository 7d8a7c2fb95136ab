//! POS commission resource.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Commission payer: the merchant absorbs the fee.
pub const COMMISSION_BY_MERCHANT: i64 = 1;

/// Commission payer: the fee is passed to the customer.
pub const COMMISSION_BY_CUSTOMER: i64 = 2;

/// A commission schedule entry for a merchant / card family / installment
/// combination.
#[derive(Debug, Clone, Deserialize)]
pub struct Commission {
    /// Merchant id.
    #[serde(default)]
    pub merchant_id: Option<i64>,
    /// Card family id.
    #[serde(default)]
    pub card_family_id: Option<i64>,
    /// Card segment type id.
    #[serde(default)]
    pub card_segment_type_id: Option<i64>,
    /// Installment count.
    #[serde(default)]
    pub installment: Option<i64>,
    /// Human-readable installment text (e.g. "Tek çekim", "2 Taksit").
    #[serde(default)]
    pub installment_text: Option<String>,
    /// Commission rate percentage.
    #[serde(default)]
    pub commission_rate: Option<f64>,
    /// Commission payer code (see the module constants).
    #[serde(default)]
    pub commission_by: Option<i64>,
    /// Commission payer text.
    #[serde(default)]
    pub commission_by_text: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Card family details.
    #[serde(default)]
    pub card_family: Option<Value>,
    /// Card segment type details.
    #[serde(default)]
    pub card_segment_type: Option<Value>,
    /// POS credential details, including the bank integration.
    #[serde(default)]
    pub company_pos_credential: Option<Value>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Commission {
    /// Whether the merchant pays the commission.
    #[must_use]
    pub fn is_paid_by_merchant(&self) -> bool {
        self.commission_by == Some(COMMISSION_BY_MERCHANT)
    }

    /// Whether the customer pays the commission.
    #[must_use]
    pub fn is_paid_by_customer(&self) -> bool {
        self.commission_by == Some(COMMISSION_BY_CUSTOMER)
    }

    /// Bank name from the POS integration, when present.
    #[must_use]
    pub fn bank_name(&self) -> Option<&str> {
        self.pos_integration_field("integration_name")
    }

    /// Bank logo URL from the POS integration, when present.
    #[must_use]
    pub fn bank_logo_url(&self) -> Option<&str> {
        self.pos_integration_field("bank_logo_url")
    }

    fn pos_integration_field(&self, field: &str) -> Option<&str> {
        self.company_pos_credential
            .as_ref()?
            .get("pos_integration")?
            .get(field)?
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payer_predicates() {
        let merchant: Commission =
            serde_json::from_value(json!({ "commission_by": 1 })).unwrap();
        assert!(merchant.is_paid_by_merchant());
        assert!(!merchant.is_paid_by_customer());

        let customer: Commission =
            serde_json::from_value(json!({ "commission_by": 2 })).unwrap();
        assert!(customer.is_paid_by_customer());
    }

    #[test]
    fn bank_details_dig_into_pos_integration() {
        let commission: Commission = serde_json::from_value(json!({
            "company_pos_credential": {
                "pos_integration": {
                    "integration_name": "Ziraat",
                    "bank_logo_url": "https://cdn.example.com/ziraat.png",
                },
            },
        }))
        .unwrap();

        assert_eq!(commission.bank_name(), Some("Ziraat"));
        assert_eq!(
            commission.bank_logo_url(),
            Some("https://cdn.example.com/ziraat.png")
        );

        let bare: Commission = serde_json::from_value(json!({})).unwrap();
        assert_eq!(bare.bank_name(), None);
    }
}
