//! Error types for the Tahsilat client.
//!
//! Every failure surfaces as a typed error rooted at [`Error`], so callers
//! can catch broadly or match a specific failure class. Errors are never
//! swallowed: a not-found response raises [`InvalidRequestError`] rather
//! than returning an empty success.

use std::collections::BTreeMap;

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::http::envelope::{ApiEnvelope, ErrorCode};
use crate::http::HttpError;
use crate::webhook::SignatureVerificationError;

/// Top-level error family for the SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (after retries, where applicable).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Missing or rejected credential, or a malformed API key.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Malformed caller input or not-found semantics.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// Business-logic failure reported by the API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Inbound webhook rejected.
    #[error(transparent)]
    SignatureVerification(#[from] SignatureVerificationError),

    /// Invalid client configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Transport-level failure.
///
/// Raised by the transport either immediately (non-transient failure) or
/// after the retry budget is spent on transient failures. HTTP error
/// responses are never `NetworkError`s; they classify as [`ApiError`],
/// [`AuthenticationError`] or [`InvalidRequestError`].
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A non-transient transport failure; not retried.
    #[error("transport failure: {0}")]
    Transport(#[source] HttpError),

    /// Transient failures exhausted the retry budget.
    #[error("request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made, including the initial one.
        attempts: u32,
        /// The failure observed on the final attempt.
        #[source]
        last: HttpError,
    },
}

/// Credential failure.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// No API key was supplied.
    #[error("API key is required")]
    MissingKey,

    /// The API key does not match the expected secret-key format.
    #[error(
        "invalid API key format: keys must start with \"sk_live_\" or \"sk_test_\"; \
         publishable keys (pk_*) cannot be used for server-side API calls"
    )]
    InvalidKeyFormat,

    /// The API rejected the credential (HTTP 401/403).
    #[error("authentication rejected (HTTP {http_status}): {message}")]
    Rejected {
        /// Human-readable message from the API.
        message: String,
        /// HTTP status code of the rejection.
        http_status: u16,
        /// Machine-readable API error code, when present.
        error_code: Option<ErrorCode>,
    },
}

/// Malformed caller input or not-found semantics.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidRequestError {
    /// Human-readable message.
    pub message: String,
    /// HTTP-like status code (404 for not-found).
    pub http_status: u16,
    /// Machine-readable API error code, when present.
    pub error_code: Option<ErrorCode>,
}

impl InvalidRequestError {
    /// Creates an error for malformed caller input, before any network call.
    #[must_use]
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            http_status: 400,
            error_code: None,
        }
    }
}

/// Generic business-logic failure reported by the API.
///
/// Carries the API error code, the raw response body and, for validation
/// failures, the per-field detail map.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message, with validation detail appended when present.
    pub message: String,
    /// HTTP status code of the response.
    pub http_status: u16,
    /// Machine-readable API error code, when present.
    pub error_code: Option<ErrorCode>,
    /// Per-field validation messages, when present.
    pub validation_errors: Option<BTreeMap<String, Vec<String>>>,
    /// Raw decoded response body, when available.
    pub body: Option<Value>,
}

/// API error code signalling a validation failure.
pub const VALIDATION_ERROR_CODE: i64 = 901;

impl ApiError {
    /// Creates an error carrying only a message and HTTP status.
    #[must_use]
    pub fn new(message: impl Into<String>, http_status: u16) -> Self {
        Self {
            message: message.into(),
            http_status,
            error_code: None,
            validation_errors: None,
            body: None,
        }
    }

    /// Whether this failure is a validation error.
    ///
    /// True when the API error code is 901 or a non-empty validation map
    /// was attached.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.error_code
            .as_ref()
            .and_then(ErrorCode::as_i64)
            .is_some_and(|code| code == VALIDATION_ERROR_CODE)
            || self
                .validation_errors
                .as_ref()
                .is_some_and(|errors| !errors.is_empty())
    }

    /// The code callers should surface: the API error code when numeric,
    /// otherwise the HTTP status.
    #[must_use]
    pub fn exception_code(&self) -> i64 {
        self.error_code
            .as_ref()
            .and_then(ErrorCode::as_i64)
            .unwrap_or_else(|| i64::from(self.http_status))
    }
}

/// Classifies a non-success response into the error taxonomy.
///
/// Invoked for any response with `status == false` or an HTTP status of
/// 400 or above. Network-level failures never reach this function.
pub(crate) fn classify_failure(
    http_status: StatusCode,
    envelope: &ApiEnvelope,
    raw: &Value,
) -> Error {
    let status = http_status.as_u16();
    let mut message = envelope
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error occurred".to_owned());
    let error_code = envelope.error_code.clone();
    let validation_errors = envelope.validation_map();

    if status == 401 || status == 403 {
        return AuthenticationError::Rejected {
            message,
            http_status: status,
            error_code,
        }
        .into();
    }

    let is_validation = status == 422
        || validation_errors.is_some()
        || error_code
            .as_ref()
            .and_then(ErrorCode::as_i64)
            .is_some_and(|code| code == VALIDATION_ERROR_CODE);

    if is_validation {
        if let Some(errors) = &validation_errors {
            for (field, messages) in errors {
                for detail in messages {
                    message.push_str(&format!(" {field}: {detail}"));
                }
            }
        }

        return ApiError {
            message,
            http_status: status,
            error_code,
            validation_errors,
            body: Some(raw.clone()),
        }
        .into();
    }

    if status == 404 {
        return InvalidRequestError {
            message,
            http_status: status,
            error_code,
        }
        .into();
    }

    ApiError {
        message,
        http_status: status,
        error_code,
        validation_errors: None,
        body: Some(raw.clone()),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_from(value: &Value) -> ApiEnvelope {
        ApiEnvelope::from_value(value)
    }

    #[test]
    fn validation_error_by_code() {
        let error = ApiError {
            message: "nope".into(),
            http_status: 400,
            error_code: Some(ErrorCode::Int(901)),
            validation_errors: None,
            body: None,
        };

        assert!(error.is_validation_error());
        assert_eq!(error.exception_code(), 901);
    }

    #[test]
    fn validation_error_by_map() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_owned(), vec!["invalid".to_owned()]);
        let error = ApiError {
            message: "nope".into(),
            http_status: 422,
            error_code: None,
            validation_errors: Some(errors),
            body: None,
        };

        assert!(error.is_validation_error());
        assert_eq!(error.exception_code(), 422);
    }

    #[test]
    fn plain_api_error_is_not_validation() {
        let error = ApiError::new("boom", 500);

        assert!(!error.is_validation_error());
        assert_eq!(error.exception_code(), 500);
    }

    #[test]
    fn classifies_unauthorized_as_authentication() {
        let raw = serde_json::json!({
            "status": false,
            "message": "invalid token",
        });
        let classified =
            classify_failure(StatusCode::UNAUTHORIZED, &envelope_from(&raw), &raw);

        match classified {
            Error::Authentication(AuthenticationError::Rejected {
                http_status,
                message,
                ..
            }) => {
                assert_eq!(http_status, 401);
                assert_eq!(message, "invalid token");
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn classifies_901_as_validation_with_detail_appended() {
        let raw = serde_json::json!({
            "status": false,
            "message": "Validation failed.",
            "error_code": 901,
            "errors": { "email": ["invalid"] },
        });
        let classified = classify_failure(StatusCode::OK, &envelope_from(&raw), &raw);

        match classified {
            Error::Api(error) => {
                assert!(error.is_validation_error());
                assert_eq!(error.message, "Validation failed. email: invalid");
                assert_eq!(
                    error.validation_errors.unwrap()["email"],
                    vec!["invalid".to_owned()]
                );
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn classifies_not_found_as_invalid_request() {
        let raw = serde_json::json!({
            "status": false,
            "message": "not found",
            "error_code": 2004,
        });
        let classified =
            classify_failure(StatusCode::NOT_FOUND, &envelope_from(&raw), &raw);

        match classified {
            Error::InvalidRequest(error) => {
                assert_eq!(error.http_status, 404);
                assert_eq!(error.error_code, Some(ErrorCode::Int(2004)));
            }
            other => panic!("expected invalid request error, got {other:?}"),
        }
    }

    #[test]
    fn classifies_other_failures_as_generic_api_error() {
        let raw = serde_json::json!({
            "status": false,
            "message": "insufficient funds",
            "error_code": 3001,
        });
        let classified = classify_failure(StatusCode::OK, &envelope_from(&raw), &raw);

        match classified {
            Error::Api(error) => {
                assert!(!error.is_validation_error());
                assert_eq!(error.exception_code(), 3001);
                assert_eq!(error.http_status, 200);
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_http_status_without_error_code() {
        let raw = serde_json::json!({ "message": "server error" });
        let classified = classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            &envelope_from(&raw),
            &raw,
        );

        match classified {
            Error::Api(error) => assert_eq!(error.exception_code(), 500),
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
