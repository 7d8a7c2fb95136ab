//! Inbound webhook signature verification.
//!
//! Webhook requests carry a `Tahsilat-Signature` header of the form
//! `t=<unix_ts>,v1=<hex_hmac_sha256>`. The signature is an HMAC-SHA256 of
//! `"{t}.{raw_payload}"` keyed by the endpoint secret. Verification checks,
//! in order: non-empty inputs, header shape, timestamp tolerance, the
//! signature itself (constant-time comparison) and finally that the
//! payload decodes to a JSON object.
//!
//! # Example
//!
//! ```
//! use tahsilat::webhook;
//!
//! let secret = "whsec_xxx";
//! let payload = r#"{"transaction_id":1}"#;
//! # let now = std::time::SystemTime::now()
//! #     .duration_since(std::time::SystemTime::UNIX_EPOCH)
//! #     .unwrap()
//! #     .as_secs() as i64;
//! let header = webhook::format_signature_header(payload, secret, now);
//!
//! let event = webhook::construct_event(payload, &header, secret).unwrap();
//! assert_eq!(event.transaction_id, Some(1));
//! ```

use std::time::Duration;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::resources::WebhookEvent;
use crate::time::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Default tolerance for the signing timestamp.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Error type for webhook verification.
#[derive(Debug, Error)]
pub enum SignatureVerificationError {
    /// No endpoint secret was supplied.
    #[error("webhook endpoint secret is required")]
    MissingSecret,

    /// No signature header was supplied.
    #[error("no Tahsilat-Signature header found")]
    MissingHeader,

    /// The request body was empty.
    #[error("webhook payload is empty")]
    EmptyPayload,

    /// The signature header does not carry a parseable `t` and `v1`.
    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    /// The signing timestamp is outside the tolerance window
    /// (replay or clock skew).
    #[error(
        "timestamp outside the tolerance window: signed at {timestamp}, \
         verified at {now}, tolerance {tolerance_seconds}s"
    )]
    TimestampOutOfTolerance {
        /// Signing time from the header.
        timestamp: i64,
        /// Verification time.
        now: i64,
        /// Allowed skew in seconds.
        tolerance_seconds: u64,
    },

    /// The signature does not match the payload.
    #[error("webhook signature mismatch")]
    SignatureMismatch,

    /// The payload is not valid JSON.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The payload decoded to something other than a JSON object.
    #[error("webhook payload must be a JSON object")]
    PayloadNotObject,
}

/// Parsed signature header: signing time plus the decoded signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Signing time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Decoded HMAC-SHA256 signature bytes.
    pub signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a `t=<ts>,v1=<sig>` header.
    ///
    /// Unknown keys are ignored; both `t` and `v1` must be present and
    /// parseable.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureVerificationError::MalformedHeader`] when either
    /// part is missing or unparseable.
    pub fn parse(header: &str) -> Result<Self, SignatureVerificationError> {
        let mut timestamp = None;
        let mut signature = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse::<i64>().map_err(|_| {
                        SignatureVerificationError::MalformedHeader(
                            "timestamp is not an integer".to_owned(),
                        )
                    })?);
                }
                "v1" => {
                    signature = Some(hex::decode(value.trim()).map_err(|_| {
                        SignatureVerificationError::MalformedHeader(
                            "signature is not valid hex".to_owned(),
                        )
                    })?);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            SignatureVerificationError::MalformedHeader("missing timestamp (t=)".to_owned())
        })?;
        let signature = signature.ok_or_else(|| {
            SignatureVerificationError::MalformedHeader("missing signature (v1=)".to_owned())
        })?;

        Ok(Self {
            timestamp,
            signature,
        })
    }
}

/// Computes the hex HMAC-SHA256 signature for a payload at a signing time.
#[must_use]
pub fn compute_signature(payload: &str, secret: &str, timestamp: i64) -> String {
    hex::encode(expected_signature(payload, secret, timestamp))
}

/// Builds a complete `t=<ts>,v1=<sig>` header for a payload.
///
/// The counterpart of verification; used when simulating webhook
/// deliveries in tests.
#[must_use]
pub fn format_signature_header(payload: &str, secret: &str, timestamp: i64) -> String {
    format!(
        "t={timestamp},v1={}",
        compute_signature(payload, secret, timestamp)
    )
}

/// Verifies a webhook delivery with the default tolerance and system clock.
///
/// # Errors
///
/// Returns [`SignatureVerificationError`] describing the first check that
/// failed.
pub fn construct_event(
    payload: &str,
    signature_header: &str,
    endpoint_secret: &str,
) -> Result<WebhookEvent, SignatureVerificationError> {
    construct_event_with_tolerance(payload, signature_header, endpoint_secret, DEFAULT_TOLERANCE)
}

/// Verifies a webhook delivery with a custom tolerance window.
///
/// # Errors
///
/// Returns [`SignatureVerificationError`] describing the first check that
/// failed.
pub fn construct_event_with_tolerance(
    payload: &str,
    signature_header: &str,
    endpoint_secret: &str,
    tolerance: Duration,
) -> Result<WebhookEvent, SignatureVerificationError> {
    construct_event_with_clock(
        payload,
        signature_header,
        endpoint_secret,
        tolerance,
        &SystemClock,
    )
}

/// Verifies a webhook delivery against an injected clock.
///
/// # Errors
///
/// Returns [`SignatureVerificationError`] describing the first check that
/// failed.
pub fn construct_event_with_clock(
    payload: &str,
    signature_header: &str,
    endpoint_secret: &str,
    tolerance: Duration,
    clock: &impl Clock,
) -> Result<WebhookEvent, SignatureVerificationError> {
    if endpoint_secret.is_empty() {
        return Err(SignatureVerificationError::MissingSecret);
    }
    if signature_header.is_empty() {
        return Err(SignatureVerificationError::MissingHeader);
    }
    if payload.is_empty() {
        return Err(SignatureVerificationError::EmptyPayload);
    }

    let header = SignatureHeader::parse(signature_header)?;

    let now = clock.unix_seconds();
    let tolerance_seconds = tolerance.as_secs();
    let skew = now.abs_diff(header.timestamp);
    if skew > tolerance_seconds {
        return Err(SignatureVerificationError::TimestampOutOfTolerance {
            timestamp: header.timestamp,
            now,
            tolerance_seconds,
        });
    }

    let expected = expected_signature(payload, endpoint_secret, header.timestamp);
    if !constant_time_eq(&expected, &header.signature) {
        return Err(SignatureVerificationError::SignatureMismatch);
    }

    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| SignatureVerificationError::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(SignatureVerificationError::PayloadNotObject);
    }

    serde_json::from_value(value)
        .map_err(|e| SignatureVerificationError::InvalidPayload(e.to_string()))
}

/// Raw expected signature bytes for constant-time comparison.
fn expected_signature(payload: &str, secret: &str, timestamp: i64) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
