//! The canonical, type-safe representation of a flattened leaf value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single scalar leaf produced by the flattener.
///
/// The variant is decided exactly once, while flattening, so downstream
/// stages (vocabulary building, triple encoding) dispatch on this enum
/// instead of re-inspecting JSON values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Converts a JSON value into a `Scalar`, or `None` if the value is a
    /// nested object or array and therefore not a leaf.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n.as_f64().unwrap_or(f64::NAN))),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    /// Converts the scalar back into a JSON value.
    ///
    /// Numbers that cannot be represented in JSON (NaN, infinities) become
    /// `null`, matching what a JSON writer would produce for them.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }

    /// Returns the string form used for string-vocabulary lookups: the text
    /// itself for strings, `"true"`/`"false"` for booleans, `None` otherwise.
    pub fn as_vocab_token(&self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s.clone()),
            Scalar::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}
