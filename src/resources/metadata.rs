//! Caller-supplied metadata attached to customers, products and payments.

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One metadata entry as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Entry key.
    pub key: String,
    /// Entry value, coerced to a string.
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,
}

/// Insertion-ordered metadata pairs.
///
/// The API transmits metadata as an ordered list of `{key, value}`
/// objects rather than a plain map, so this type preserves insertion
/// order and serializes to that list shape:
///
/// ```
/// use tahsilat::resources::Metadata;
///
/// let metadata = Metadata::new().with("order_id", "123");
/// let json = serde_json::to_value(&metadata).unwrap();
/// assert_eq!(
///     json,
///     serde_json::json!([{ "key": "order_id", "value": "123" }])
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    /// Creates an empty metadata collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, builder-style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(MetadataEntry {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Looks up the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Returns true when no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    /// Collects the entries into a key→value map (later duplicates win).
    #[must_use]
    pub fn as_map(&self) -> std::collections::BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Metadata;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a list of {key, value} objects")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = seq.next_element::<MetadataEntry>()? {
                    entries.push(entry);
                }
                Ok(Metadata { entries })
            }

            // Legacy endpoints return metadata as a plain object.
            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push(MetadataEntry {
                        key,
                        value: match value {
                            Value::String(text) => text,
                            Value::Null => String::new(),
                            other => other.to_string(),
                        },
                    });
                }
                Ok(Metadata { entries })
            }

            // Some endpoints omit metadata as null rather than an empty list.
            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Metadata::new())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Metadata::new())
            }
        }

        deserializer.deserialize_any(EntriesVisitor)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| MetadataEntry {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = &'a MetadataEntry;
    type IntoIter = std::slice::Iter<'a, MetadataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accepts any scalar as a string value.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_ordered_pair_list() {
        let metadata = Metadata::new()
            .with("order_id", "123")
            .with("source", "sdk");

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            json!([
                { "key": "order_id", "value": "123" },
                { "key": "source", "value": "sdk" },
            ])
        );
    }

    #[test]
    fn deserializes_from_pair_list() {
        let metadata: Metadata = serde_json::from_value(json!([
            { "key": "order_id", "value": "123" },
        ]))
        .unwrap();

        assert_eq!(metadata.get("order_id"), Some("123"));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn deserializes_null_as_empty() {
        let metadata: Metadata = serde_json::from_value(Value::Null).unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn deserializes_legacy_object_shape() {
        let metadata: Metadata =
            serde_json::from_value(json!({ "sku": "GC-100", "attempt": 2 })).unwrap();

        assert_eq!(metadata.get("sku"), Some("GC-100"));
        assert_eq!(metadata.get("attempt"), Some("2"));
    }

    #[test]
    fn coerces_scalar_values_to_strings() {
        let metadata: Metadata = serde_json::from_value(json!([
            { "key": "attempt", "value": 2 },
            { "key": "flagged", "value": true },
        ]))
        .unwrap();

        assert_eq!(metadata.get("attempt"), Some("2"));
        assert_eq!(metadata.get("flagged"), Some("true"));
    }

    #[test]
    fn as_map_collects_pairs() {
        let metadata = Metadata::new().with("a", "1").with("b", "2");
        let map = metadata.as_map();

        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn from_iterator_preserves_order() {
        let metadata: Metadata = [("z", "26"), ("a", "1")].into_iter().collect();
        let keys: Vec<_> = metadata.iter().map(|entry| entry.key.as_str()).collect();

        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let metadata = Metadata::new().with("a", "1");
        assert_eq!(metadata.get("b"), None);
    }
}
