//! Verified webhook event resource.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::status::{payment_status, transaction_status};
use super::Metadata;

/// Transaction snapshot delivered by a verified webhook.
///
/// Only produced by [`webhook::construct_event`](crate::webhook::construct_event)
/// after the signature has been verified.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Transaction id.
    #[serde(default)]
    pub transaction_id: Option<i64>,
    /// Transaction amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Installment count.
    #[serde(default)]
    pub installment_count: Option<i64>,
    /// Payment status code.
    #[serde(default)]
    pub payment_status: Option<i64>,
    /// Payment status text.
    #[serde(default)]
    pub payment_status_text: Option<String>,
    /// Transaction status code.
    #[serde(default)]
    pub transaction_status: Option<i64>,
    /// Transaction status text.
    #[serde(default)]
    pub transaction_status_text: Option<String>,
    /// Gateway message, when present.
    #[serde(default)]
    pub transaction_message: Option<String>,
    /// Gateway code, when present.
    #[serde(default)]
    pub transaction_code: Option<String>,
    /// Currency code.
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Payment method code.
    #[serde(default)]
    pub payment_method: Option<i64>,
    /// Payment method text.
    #[serde(default)]
    pub payment_method_text: Option<String>,
    /// Whether this is a pre-authorization.
    #[serde(default)]
    pub pre_auth: Option<bool>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Transaction start time.
    #[serde(default)]
    pub start_at: Option<String>,
    /// Transaction end time.
    #[serde(default)]
    pub end_at: Option<String>,
    /// Transaction metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl WebhookEvent {
    /// Whether the payment succeeded: status success and the transaction
    /// completed or pre-authorized.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.payment_status == Some(payment_status::SUCCESS)
            && matches!(
                self.transaction_status,
                Some(transaction_status::COMPLETED | transaction_status::PRE_AUTHORIZED)
            )
    }

    /// Whether the payment failed.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        self.payment_status == Some(payment_status::FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_requires_completed_or_pre_authorized() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "transaction_id": 1,
            "payment_status": 1,
            "transaction_status": 2,
        }))
        .unwrap();

        assert!(event.is_success());
        assert!(!event.is_fail());
        assert_eq!(event.transaction_id, Some(1));
    }

    #[test]
    fn failed_payment_is_fail() {
        let event: WebhookEvent =
            serde_json::from_value(json!({ "payment_status": 2 })).unwrap();

        assert!(event.is_fail());
        assert!(!event.is_success());
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "transaction_id": 9,
            "acquirer_reference": "AR-1",
        }))
        .unwrap();

        assert_eq!(event.extra["acquirer_reference"], json!("AR-1"));
    }
}
