// ABOUTME: Tagged cell value variant shared by parameters and query results
// ABOUTME: Covers the scalar types both backends round-trip without schema knowledge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Tagged Values
//!
//! Providers return loosely typed cells; [`Value`] pins them to a closed
//! variant so downstream code pattern-matches exhaustively instead of
//! juggling an unconstrained dynamic type.

/// A single cell value, as bound into a statement or read out of a result
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Boolean
    Boolean(bool),
}

impl Value {
    /// Name of the variant, for diagnostics
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Check for SQL NULL
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integer payload, if this is an integer
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a float
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if this is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Blob payload, if this is a blob
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(v) => Self::from(v),
            // Non-finite floats have no JSON representation
            Value::Float(v) => serde_json::Number::from_f64(v).map_or(Self::Null, Self::Number),
            Value::Text(v) => Self::String(v),
            Value::Blob(v) => Self::from(v),
            Value::Boolean(v) => Self::Bool(v),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Boolean(v),
            serde_json::Value::Number(v) => v
                .as_i64()
                .map_or_else(|| Self::Float(v.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(v) => Self::Text(v),
            // Composite JSON has no scalar slot; carry it as its JSON text
            composite @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Text(composite.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conversions() {
        assert_eq!(Value::from(7), Value::Integer(7));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from("abc"), Value::Text("abc".into()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Blob(vec![1, 2]));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn accessors_are_strict() {
        assert_eq!(Value::Integer(1).as_integer(), Some(1));
        assert_eq!(Value::Integer(1).as_float(), None);
        assert_eq!(Value::Text("t".into()).as_text(), Some("t"));
        assert!(Value::Null.is_null());
        assert!(!Value::Boolean(false).is_null());
    }

    #[test]
    fn json_round_trip() {
        let json = serde_json::Value::from(Value::Integer(42));
        assert_eq!(json, serde_json::json!(42));
        assert_eq!(Value::from(json), Value::Integer(42));

        let json = serde_json::Value::from(Value::Text("hello".into()));
        assert_eq!(Value::from(json), Value::Text("hello".into()));

        assert_eq!(serde_json::Value::from(Value::Null), serde_json::Value::Null);
    }

    #[test]
    fn composite_json_becomes_text() {
        let value = Value::from(serde_json::json!({"a": 1}));
        assert_eq!(value, Value::Text("{\"a\":1}".into()));
    }

    #[test]
    fn non_finite_float_maps_to_json_null() {
        let json = serde_json::Value::from(Value::Float(f64::NAN));
        assert_eq!(json, serde_json::Value::Null);
    }
}
