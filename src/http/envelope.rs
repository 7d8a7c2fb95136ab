//! The API's uniform JSON response envelope.

use std::collections::BTreeMap;

use serde_json::Value;

/// Machine-readable API error code.
///
/// The API reports numeric codes for most failures but string codes for a
/// few legacy endpoints; both are preserved as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// Numeric error code.
    Int(i64),
    /// String error code.
    Str(String),
}

impl ErrorCode {
    /// Reads the code from a JSON value, tolerating either representation.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(code) = value.as_i64() {
            return Some(Self::Int(code));
        }
        value.as_str().map(|code| Self::Str(code.to_owned()))
    }

    /// The numeric value, when the code is numeric or parses as a number.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(code) => Some(*code),
            Self::Str(code) => code.parse().ok(),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(code) => write!(f, "{code}"),
            Self::Str(code) => write!(f, "{code}"),
        }
    }
}

/// Decoded view of the uniform response wrapper
/// `{status, data, message, error_code, errors}`.
///
/// Extraction is field-by-field and lenient: unexpected shapes degrade to
/// `None` instead of failing the whole response, mirroring how the API's
/// own clients read these envelopes.
#[derive(Debug, Clone, Default)]
pub struct ApiEnvelope {
    /// Business-level success flag.
    pub status: Option<bool>,
    /// Resource payload, when the response is enveloped.
    pub data: Option<Value>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Machine-readable error code.
    pub error_code: Option<ErrorCode>,
    /// Per-field validation messages.
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiEnvelope {
    /// Extracts the envelope fields from a decoded response body.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            status: value.get("status").and_then(Value::as_bool),
            data: value
                .get("data")
                .filter(|data| !data.is_null())
                .cloned(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
            error_code: value.get("error_code").and_then(ErrorCode::from_value),
            errors: value.get("errors").and_then(Self::parse_errors),
        }
    }

    /// Whether the envelope reports a business-level failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status == Some(false)
    }

    /// The validation detail map, when non-empty.
    #[must_use]
    pub fn validation_map(&self) -> Option<BTreeMap<String, Vec<String>>> {
        self.errors.clone().filter(|errors| !errors.is_empty())
    }

    /// Parses the `errors` field, accepting both `field: [msg]` and
    /// `field: msg` shapes.
    fn parse_errors(value: &Value) -> Option<BTreeMap<String, Vec<String>>> {
        let object = value.as_object()?;
        let mut errors = BTreeMap::new();

        for (field, messages) in object {
            let collected: Vec<String> = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToOwned::to_owned)
                    .collect(),
                Value::String(message) => vec![message.clone()],
                _ => Vec::new(),
            };

            if !collected.is_empty() {
                errors.insert(field.clone(), collected);
            }
        }

        Some(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_success_envelope() {
        let value = json!({
            "status": true,
            "data": { "id": 7 },
            "message": "ok",
        });
        let envelope = ApiEnvelope::from_value(&value);

        assert_eq!(envelope.status, Some(true));
        assert_eq!(envelope.data, Some(json!({ "id": 7 })));
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert!(envelope.error_code.is_none());
        assert!(!envelope.is_failure());
    }

    #[test]
    fn null_data_reads_as_absent() {
        let value = json!({ "status": true, "data": null });
        let envelope = ApiEnvelope::from_value(&value);

        assert!(envelope.data.is_none());
    }

    #[test]
    fn error_code_accepts_int_and_string() {
        let numeric = ApiEnvelope::from_value(&json!({ "error_code": 901 }));
        assert_eq!(numeric.error_code, Some(ErrorCode::Int(901)));

        let string = ApiEnvelope::from_value(&json!({ "error_code": "E42" }));
        assert_eq!(string.error_code, Some(ErrorCode::Str("E42".into())));
        assert_eq!(string.error_code.unwrap().as_i64(), None);

        let numeric_string = ErrorCode::Str("2004".into());
        assert_eq!(numeric_string.as_i64(), Some(2004));
    }

    #[test]
    fn errors_accept_list_and_scalar_messages() {
        let value = json!({
            "errors": {
                "email": ["invalid", "taken"],
                "phone": "required",
            }
        });
        let envelope = ApiEnvelope::from_value(&value);
        let errors = envelope.errors.unwrap();

        assert_eq!(errors["email"], vec!["invalid", "taken"]);
        assert_eq!(errors["phone"], vec!["required"]);
    }

    #[test]
    fn empty_errors_map_yields_no_validation_detail() {
        let value = json!({ "errors": {} });
        let envelope = ApiEnvelope::from_value(&value);

        assert!(envelope.validation_map().is_none());
    }

    #[test]
    fn unexpected_shapes_degrade_to_none() {
        let value = json!({
            "status": "yes",
            "message": 12,
            "error_code": { "nested": true },
            "errors": "broken",
        });
        let envelope = ApiEnvelope::from_value(&value);

        assert!(envelope.status.is_none());
        assert!(envelope.message.is_none());
        assert!(envelope.error_code.is_none());
        assert!(envelope.errors.is_none());
        assert!(!envelope.is_failure());
    }
}
