//! Node Metadata
//!
//! Metadata is a key/value mapping attached to a node. A key may hold several
//! values, so the mapping is `key -> Vec<Value>` and every value is kept.
//!
//! Hosts that flatten metadata to text store structured values (page-builder
//! layouts, settings blobs) as serialized JSON strings. [`maybe_unserialize`]
//! turns those back into structured values before they are reattached.

use serde_json::Value;
use std::collections::BTreeMap;

/// All metadata for a node: key -> every value stored under that key
pub type Metadata = BTreeMap<String, Vec<Value>>;

/// Decode a value that may hold serialized structured data.
///
/// A string whose trimmed content parses as a JSON object or array is
/// returned as that structure. Anything else (plain strings, numbers, strings
/// that happen to parse as a JSON scalar) is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use pagetree_core::models::maybe_unserialize;
/// use serde_json::json;
///
/// let layout = json!("{\"rows\":[{\"cols\":2}]}");
/// assert_eq!(maybe_unserialize(&layout), json!({"rows": [{"cols": 2}]}));
///
/// // "42" stays a string: only objects and arrays are decoded
/// assert_eq!(maybe_unserialize(&json!("42")), json!("42"));
/// ```
pub fn maybe_unserialize(value: &Value) -> Value {
    let Value::String(raw) = value else {
        return value.clone();
    };

    let trimmed = raw.trim();
    if !looks_serialized(trimmed) {
        return value.clone();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(decoded @ (Value::Object(_) | Value::Array(_))) => decoded,
        _ => value.clone(),
    }
}

fn looks_serialized(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}

/// Total number of values across all keys
pub fn metadata_value_count(metadata: &Metadata) -> usize {
    metadata.values().map(Vec::len).sum()
}
