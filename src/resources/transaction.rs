//! Transaction retrieval, refund and pre-auth resolution resources.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::status::{payment_method, payment_status, transaction_status};
use super::Metadata;

/// Full state of a transaction as reported by `GET /transaction/{id}`.
///
/// Amounts are in minor currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResult {
    /// Transaction id.
    #[serde(default)]
    pub transaction_id: Option<i64>,
    /// Amount in minor currency units.
    #[serde(default)]
    pub amount: Option<i64>,
    /// Currency code (TRY, USD, EUR).
    #[serde(default)]
    pub currency_code: Option<String>,
    /// Installment count.
    #[serde(default)]
    pub installment_count: Option<i64>,
    /// Payment status code (see [`payment_status`]).
    #[serde(default)]
    pub payment_status: Option<i64>,
    /// Payment status text.
    #[serde(default)]
    pub payment_status_text: Option<String>,
    /// Transaction status code (see [`transaction_status`]).
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
    /// Payment method code (see [`payment_method`]).
    #[serde(default)]
    pub payment_method: Option<i64>,
    /// Payment method text.
    #[serde(default)]
    pub payment_method_text: Option<String>,
    /// Whether this is a pre-authorization.
    #[serde(default)]
    pub pre_auth: Option<bool>,
    /// Creation timestamp (ISO 8601).
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
    /// Human-readable amount (e.g. `"200.00"`).
    #[serde(default)]
    pub formatted_amount: Option<String>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TransactionResult {
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

    /// Whether the customer abandoned the payment.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.payment_status == Some(payment_status::INCOMPLETE)
    }

    /// Whether the transaction is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.transaction_status == Some(transaction_status::PENDING)
    }

    /// Whether the transaction completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.transaction_status == Some(transaction_status::COMPLETED)
    }

    /// Whether funds are held pending capture.
    #[must_use]
    pub fn is_pre_authorized(&self) -> bool {
        self.transaction_status == Some(transaction_status::PRE_AUTHORIZED)
    }

    /// Whether the transaction was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.transaction_status == Some(transaction_status::CANCELLED)
    }

    /// Whether the transaction was fully refunded.
    #[must_use]
    pub fn is_refunded(&self) -> bool {
        self.transaction_status == Some(transaction_status::REFUNDED)
    }

    /// Whether the transaction was partially refunded.
    #[must_use]
    pub fn is_partial_refunded(&self) -> bool {
        self.transaction_status == Some(transaction_status::PARTIAL_REFUNDED)
    }

    /// Whether any refund (full or partial) applies.
    #[must_use]
    pub fn has_refund(&self) -> bool {
        matches!(
            self.transaction_status,
            Some(transaction_status::REFUNDED | transaction_status::PARTIAL_REFUNDED)
        )
    }

    /// Whether the transaction was charged back in full.
    #[must_use]
    pub fn is_chargeback(&self) -> bool {
        self.transaction_status == Some(transaction_status::CHARGEBACK)
    }

    /// Whether the transaction was partially charged back.
    #[must_use]
    pub fn is_partial_chargeback(&self) -> bool {
        self.transaction_status == Some(transaction_status::PARTIAL_CHARGEBACK)
    }

    /// Whether any chargeback (full or partial) applies.
    #[must_use]
    pub fn has_chargeback(&self) -> bool {
        matches!(
            self.transaction_status,
            Some(transaction_status::CHARGEBACK | transaction_status::PARTIAL_CHARGEBACK)
        )
    }

    /// Whether the transaction was flagged as fraud.
    #[must_use]
    pub fn is_fraud(&self) -> bool {
        self.transaction_status == Some(transaction_status::FRAUD)
    }

    /// Whether the transaction timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.transaction_status == Some(transaction_status::TIMEOUT)
    }

    /// Whether this was a 3-D Secure payment.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.payment_method == Some(payment_method::THREE_D)
    }

    /// Whether this was a 2-D payment.
    #[must_use]
    pub fn is_2d(&self) -> bool {
        self.payment_method == Some(payment_method::TWO_D)
    }

    /// Whether this is a pre-authorization transaction.
    #[must_use]
    pub fn is_pre_auth(&self) -> bool {
        self.pre_auth == Some(true)
    }

    /// Amount in decimal major units (e.g. 20000 → 200.00).
    #[must_use]
    pub fn amount_decimal(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let minor = self.amount.unwrap_or(0) as f64;
        minor / 100.0
    }

    /// Looks up a metadata value by key.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }

    /// Payment status text in Turkish.
    #[must_use]
    pub fn payment_status_text_tr(&self) -> &'static str {
        match self.payment_status {
            Some(payment_status::SUCCESS) => "Başarılı",
            Some(payment_status::FAILED) => "Başarısız",
            Some(payment_status::INCOMPLETE) => "Tamamlanmadı",
            _ => "Bilinmiyor",
        }
    }

    /// Transaction status text in Turkish.
    #[must_use]
    pub fn status_text_tr(&self) -> &'static str {
        match self.transaction_status {
            Some(transaction_status::PENDING) => "Beklemede",
            Some(transaction_status::COMPLETED) => "Tamamlandı",
            Some(transaction_status::PRE_AUTHORIZED) => "Ön Provizyon",
            Some(transaction_status::CANCELLED) => "İptal",
            Some(transaction_status::REFUNDED) => "İade",
            Some(transaction_status::PARTIAL_REFUNDED) => "Kısmi İade",
            Some(transaction_status::CHARGEBACK) => "İtiraz",
            Some(transaction_status::PARTIAL_CHARGEBACK) => "Kısmi İtiraz",
            Some(transaction_status::FRAUD) => "Şüpheli",
            Some(transaction_status::TIMEOUT) => "Zaman Aşımı",
            _ => "Bilinmiyor",
        }
    }
}

/// Result of a refund request.
#[derive(Debug, Clone, Deserialize)]
pub struct Refund {
    /// Transaction id the refund applies to.
    #[serde(default)]
    pub transaction_id: Option<i64>,
    /// Refunded amount in minor currency units.
    #[serde(default)]
    pub amount: Option<i64>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Result of resolving a pre-authorization.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvePreAuth {
    /// Transaction id the resolution applies to.
    #[serde(default)]
    pub transaction_id: Option<i64>,
    /// Fields this SDK version does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
