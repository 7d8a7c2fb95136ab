//! Status codes reported by the API.

/// Payment status codes.
pub mod payment_status {
    /// Payment completed successfully.
    pub const SUCCESS: i64 = 1;
    /// Payment failed.
    pub const FAILED: i64 = 2;
    /// Payment was not completed by the customer.
    pub const INCOMPLETE: i64 = 3;
}

/// Transaction status codes.
pub mod transaction_status {
    /// Awaiting completion.
    pub const PENDING: i64 = 1;
    /// Completed.
    pub const COMPLETED: i64 = 2;
    /// Funds held pending capture.
    pub const PRE_AUTHORIZED: i64 = 3;
    /// Cancelled.
    pub const CANCELLED: i64 = 4;
    /// Fully refunded.
    pub const REFUNDED: i64 = 5;
    /// Partially refunded.
    pub const PARTIAL_REFUNDED: i64 = 6;
    /// Charged back in full.
    pub const CHARGEBACK: i64 = 7;
    /// Partially charged back.
    pub const PARTIAL_CHARGEBACK: i64 = 8;
    /// Flagged as fraudulent.
    pub const FRAUD: i64 = 9;
    /// Timed out.
    pub const TIMEOUT: i64 = 10;
}

/// Payment method codes.
pub mod payment_method {
    /// 3-D Secure payment.
    pub const THREE_D: i64 = 1;
    /// 2-D (non-3DS) payment.
    pub const TWO_D: i64 = 2;
}
