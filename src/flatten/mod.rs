//! Flattening of nested JSON values into single-level dotted-path records,
//! and the inverse reconstruction.
//!
//! Objects recurse with `.`-joined paths and arrays with positional index
//! segments, so `{a: {b: 2}}` becomes `{"a.b": 2}` and `{a: [1, 2]}` becomes
//! `{"a.0": 1, "a.1": 2}`. Arrays whose elements are all objects with an
//! identical key set are "uniform" and collapse under the reserved `-1`
//! segment, keeping the key-vocabulary cardinality independent of array
//! length. Each leaf is committed to a [`Scalar`] variant exactly once here.

use crate::types::{FlatRecord, Scalar};
use serde_json::{Map, Value};

//==================================================================================
// 1. Flattening
//==================================================================================

/// Flattens a nested JSON value into a single-level record keyed by dotted
/// paths. Key enumeration follows the input's native property order. A bare
/// scalar at the root, an empty object, or an empty array contributes no
/// entries.
pub fn flatten(value: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_child(child, &join(prefix, key), out);
            }
        }
        Value::Array(items) => {
            if is_uniform_array(items) {
                // Collapse per-instance cardinality: the first element stands
                // in for every instance under the reserved `-1` segment.
                flatten_child(&items[0], &join(prefix, "-1"), out);
            } else {
                for (index, child) in items.iter().enumerate() {
                    flatten_child(child, &join(prefix, &index.to_string()), out);
                }
            }
        }
        _ => {}
    }
}

fn flatten_child(child: &Value, path: &str, out: &mut FlatRecord) {
    match Scalar::from_json(child) {
        Some(scalar) => out.insert(path, scalar),
        None => flatten_into(child, path, out),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Returns `true` for a non-empty array whose elements are all non-null,
/// non-array objects sharing an identical sorted key set.
pub fn is_uniform_array(items: &[Value]) -> bool {
    let mut shape: Option<Vec<&str>> = None;
    for item in items {
        let map = match item {
            Value::Object(map) => map,
            _ => return false,
        };
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        match &shape {
            None => shape = Some(keys),
            Some(first) => {
                if *first != keys {
                    return false;
                }
            }
        }
    }
    shape.is_some()
}

/// Returns `true` when a path segment is a non-negative array index.
///
/// The reserved `-1` segment is deliberately NOT an index: it rebuilds as a
/// map key on unflatten, and it is the collapse target for tolerant
/// vocabulary lookups.
pub(crate) fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

//==================================================================================
// 2. Unflattening
//==================================================================================

/// Rebuilds a nested JSON value from a flattened record: the exact inverse of
/// [`flatten`] for records with scalar leaves. Non-negative integer segments
/// rebuild arrays (sparse indices backfill with `null`), all other segments
/// rebuild objects.
pub fn unflatten(record: &FlatRecord) -> Value {
    if record.is_empty() {
        return Value::Object(Map::new());
    }
    let root_is_array = record
        .keys()
        .all(|key| is_index_segment(first_segment(key)));
    let mut root = if root_is_array {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    };
    for (key, scalar) in record.iter() {
        let segments: Vec<&str> = key.split('.').collect();
        insert_path(&mut root, &segments, scalar);
    }
    root
}

fn first_segment(key: &str) -> &str {
    key.split('.').next().unwrap_or(key)
}

fn insert_path(node: &mut Value, segments: &[&str], value: &Scalar) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        set_slot(node, segment, value.to_json());
        return;
    }
    let child_is_array = is_index_segment(rest[0]);
    if let Some(child) = slot_mut(node, segment, child_is_array) {
        insert_path(child, rest, value);
    }
}

/// Writes a leaf into a container slot. Writes into an array under a
/// non-index segment have nowhere to go and are dropped.
fn set_slot(node: &mut Value, segment: &str, value: Value) {
    match node {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
        }
        Value::Array(items) => {
            if let Ok(index) = segment.parse::<usize>() {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                items[index] = value;
            }
        }
        _ => {}
    }
}

/// Descends into (or creates) the container at a segment. An existing
/// container is kept regardless of kind; a scalar in the way is replaced.
fn slot_mut<'a>(node: &'a mut Value, segment: &str, child_is_array: bool) -> Option<&'a mut Value> {
    let slot = match node {
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        Value::Array(items) => {
            let index: usize = segment.parse().ok()?;
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        _ => return None,
    };
    if !slot.is_object() && !slot.is_array() {
        *slot = if child_is_array {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        };
    }
    Some(slot)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let value = json!({"a": {"b": {"c": 1, "d": 2}}, "e": 3, "f": {"g": 4}});
        let flat = flatten(&value);
        let entries: Vec<(&str, &Scalar)> = flat.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("a.b.c", &Scalar::Number(1.0)),
                ("a.b.d", &Scalar::Number(2.0)),
                ("e", &Scalar::Number(3.0)),
                ("f.g", &Scalar::Number(4.0)),
            ]
        );
    }

    #[test]
    fn test_flatten_positional_arrays() {
        let value = json!({"a": [1, 2], "b": ["x", true]});
        let flat = flatten(&value);
        assert_eq!(flat.get("a.0"), Some(&Scalar::Number(1.0)));
        assert_eq!(flat.get("a.1"), Some(&Scalar::Number(2.0)));
        assert_eq!(flat.get("b.0"), Some(&Scalar::Text("x".to_string())));
        assert_eq!(flat.get("b.1"), Some(&Scalar::Bool(true)));
    }

    #[test]
    fn test_flatten_uniform_array_collapses() {
        let value = json!({"users": [
            {"name": "alice", "age": 30},
            {"name": "bob", "age": 25}
        ]});
        let flat = flatten(&value);
        // The first element is the representative; cardinality is compacted.
        assert_eq!(flat.len(), 2);
        assert_eq!(
            flat.get("users.-1.name"),
            Some(&Scalar::Text("alice".to_string()))
        );
        assert_eq!(flat.get("users.-1.age"), Some(&Scalar::Number(30.0)));
    }

    #[test]
    fn test_flatten_mixed_shape_array_stays_positional() {
        let value = json!({"items": [{"a": 1}, {"b": 2}]});
        let flat = flatten(&value);
        assert_eq!(flat.get("items.0.a"), Some(&Scalar::Number(1.0)));
        assert_eq!(flat.get("items.1.b"), Some(&Scalar::Number(2.0)));
    }

    #[test]
    fn test_flatten_degenerate_inputs() {
        assert!(flatten(&json!({})).is_empty());
        assert!(flatten(&json!([])).is_empty());
        assert!(flatten(&json!(42)).is_empty());
        assert!(flatten(&json!({"empty": {}, "none": []})).is_empty());
    }

    #[test]
    fn test_unflatten_reverses_flatten() {
        let value = json!({"a": {"b": {"c": 1.0, "d": 2.0}}, "e": 3.0, "f": {"g": 4.0}});
        let flat = flatten(&value);
        assert_eq!(unflatten(&flat), value);
    }

    #[test]
    fn test_unflatten_rebuilds_arrays() {
        let value = json!({"a": [1.0, 2.0], "b": {"c": ["x", "y"]}});
        let flat = flatten(&value);
        assert_eq!(unflatten(&flat), value);
    }

    #[test]
    fn test_unflatten_array_root() {
        let value = json!([{"name": "solo"}]);
        let flat = flatten(&value);
        // A single-element array of objects is uniform, so it compacts.
        assert_eq!(unflatten(&flat), json!({"-1": {"name": "solo"}}));

        let mixed = json!([1.0, "two"]);
        assert_eq!(unflatten(&flatten(&mixed)), mixed);
    }

    #[test]
    fn test_unflatten_backfills_sparse_indices() {
        let mut record = FlatRecord::new();
        record.insert("a.2", Scalar::Number(9.0));
        assert_eq!(unflatten(&record), json!({"a": [null, null, 9.0]}));
    }

    #[test]
    fn test_unflatten_empty_record() {
        assert_eq!(unflatten(&FlatRecord::new()), json!({}));
    }

    #[test]
    fn test_uniform_array_detection() {
        assert!(is_uniform_array(&[json!({"a": 1, "b": 2}), json!({"b": 3, "a": 4})]));
        assert!(!is_uniform_array(&[json!({"a": 1}), json!({"b": 2})]));
        assert!(!is_uniform_array(&[json!({"a": 1}), json!(5)]));
        assert!(!is_uniform_array(&[]));
        assert!(!is_uniform_array(&[json!([1]), json!([2])]));
    }
}
