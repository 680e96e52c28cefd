//! Permissive field decoders.
//!
//! The backend is trusted but loosely typed: numbers sometimes arrive as
//! strings, lists as `null`. A bad field decodes to its default instead of
//! failing the whole event, so one malformed value never blanks the dashboard.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Counts. A fractional number is truncated toward zero (`2.9` reads as 2);
/// negative numbers are rejected.
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn as_seq<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Dropping malformed list entry: {}", e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn as_map(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

// Model fields: always defined, default on garbage.

pub fn f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(as_f64(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(as_u64(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_string(&Value::deserialize(d)?).unwrap_or_default())
}

pub fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(as_seq(Value::deserialize(d)?))
}

pub fn map<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, Value>, D::Error> {
    Ok(as_map(Value::deserialize(d)?))
}

// Optional model fields: `None` unless the value is usable.

pub fn maybe_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(as_f64(&Value::deserialize(d)?))
}

pub fn maybe_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(as_string(&Value::deserialize(d)?))
}

// Partial-update fields: `Some` whenever the key is present at all.
// Absent keys never reach these (the field falls back to `None` via `default`).

pub fn present_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    f64(d).map(Some)
}

pub fn present_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    u64(d).map(Some)
}

pub fn present_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    string(d).map(Some)
}

pub fn present_seq<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    seq(d).map(Some)
}

pub fn present_map<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<BTreeMap<String, Value>>, D::Error> {
    map(d).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(as_f64(&json!("12.5")), Some(12.5));
        assert_eq!(as_f64(&json!(" 3 ")), Some(3.0));
        assert_eq!(as_f64(&json!("abc")), None);
        assert_eq!(as_f64(&json!(null)), None);
    }

    #[test]
    fn counts_reject_negative_values() {
        assert_eq!(as_u64(&json!(4)), Some(4));
        assert_eq!(as_u64(&json!(4.0)), Some(4));
        assert_eq!(as_u64(&json!(-1)), None);
    }

    #[test]
    fn fractional_counts_truncate() {
        assert_eq!(as_u64(&json!(2.9)), Some(2));
        assert_eq!(as_u64(&json!(0.5)), Some(0));
    }

    #[test]
    fn strings_stringify_scalars() {
        assert_eq!(as_string(&json!(1700000000.5)).as_deref(), Some("1700000000.5"));
        assert_eq!(as_string(&json!(true)).as_deref(), Some("true"));
        assert_eq!(as_string(&json!({"a": 1})), None);
    }

    #[test]
    fn seq_drops_non_objects_and_non_arrays() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            #[serde(default)]
            a: i64,
        }

        let items: Vec<Item> = as_seq(json!([{"a": 1}, 7, "x", {"a": 2}]));
        assert_eq!(items, vec![Item { a: 1 }, Item { a: 2 }]);

        let empty: Vec<Item> = as_seq(json!("not a list"));
        assert!(empty.is_empty());
    }

    #[test]
    fn map_of_non_object_is_empty() {
        assert!(as_map(json!([1, 2])).is_empty());
        assert_eq!(as_map(json!({"k": 1})).len(), 1);
    }
}
