//! Per-endpoint operations.
//!
//! Each service is a thin, typed wrapper over the dispatcher: it encodes
//! its parameters the way the endpoint expects, issues the request and
//! decodes the resource. Two parameter conventions exist across endpoints
//! and both are supported:
//!
//! - metadata travels as an ordered `[{key, value}]` list;
//! - nested structures (the payment product list) are JSON-encoded into a
//!   string placed in the form body.

mod bin_lookup;
mod commissions;
mod customers;
mod payments;
mod products;
mod tokens;
mod transactions;

#[cfg(test)]
mod services_tests;

pub use bin_lookup::{BinLookupParams, BinLookups};
pub use commissions::{CommissionSearchParams, Commissions};
pub use customers::{CreateCustomerParams, Customers};
pub use payments::{CreatePaymentParams, PaymentProduct, Payments};
pub use products::{CreateProductParams, Products};
pub use tokens::Tokens;
pub use transactions::{RefundParams, ResolvePreAuthParams, Transactions};

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{ApiError, Error, InvalidRequestError};

/// Serializes typed parameters into the dispatcher's parameter map.
pub(crate) fn to_param_map<T: Serialize>(params: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(InvalidRequestError::bad_input(
            "request parameters must serialize to an object",
        )
        .into()),
        Err(e) => Err(InvalidRequestError::bad_input(format!(
            "failed to serialize request parameters: {e}"
        ))
        .into()),
    }
}

/// Decodes an unwrapped payload into a typed resource.
pub(crate) fn from_payload<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::new(format!("Unexpected response shape: {e}"), 200).into())
}

/// Serializes a value as a JSON string field (the form body carries the
/// encoded text, not the nested structure).
pub(crate) fn as_json_string<T: Serialize, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let encoded = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

