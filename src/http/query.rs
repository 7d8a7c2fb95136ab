//! RFC 3986 query-string encoding compatible with the API's form layer.
//!
//! The API expects PHP `http_build_query` conventions: nested structures
//! flatten into bracketed keys (`metadata[0][key]=order_id`), booleans
//! become `1`/`0`, and null values are skipped entirely. Spaces encode as
//! `%20`, not `+`.

use serde_json::{Map, Value};

/// Encodes a parameter map into a query string.
///
/// Used both for GET/DELETE query strings and for form-urlencoded bodies.
#[must_use]
pub fn encode(params: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        walk(key, value, &mut pairs);
    }

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Flattens one value under the given key prefix.
fn walk(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        // http_build_query drops null members
        Value::Null => {}
        Value::Bool(flag) => out.push((prefix.to_owned(), if *flag { "1" } else { "0" }.to_owned())),
        Value::Number(number) => out.push((prefix.to_owned(), number.to_string())),
        Value::String(text) => out.push((prefix.to_owned(), text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(&format!("{prefix}[{index}]"), item, out);
            }
        }
        Value::Object(object) => {
            for (key, item) in object {
                walk(&format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}
