//! Boundary to the external JSON decoder.
//!
//! The engine never tokenizes JSON text itself; `serde_json` does.
//! This module adds the two things the engine needs on top of plain
//! [`Value`] navigation: decoding a document through the engine's own
//! error type, and classifying a value with `integer` and `real` kept
//! distinct (a bare `Value::Number` conflates them).

use serde_json::Value;

use crate::parse::SchemaError;

/// JSON value classification as seen by the schema engine.
///
/// Doubles as the schema node type tag: the `"type"` keyword's six
/// names map onto the non-`Null` variants via [`ValueType::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    Real,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Map a `"type"` keyword value to a type tag. `"number"` is the
    /// schema spelling for [`ValueType::Real`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "boolean" => Some(Self::Bool),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Real),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

/// Classify a decoded value.
///
/// A number is [`ValueType::Integer`] when the decoder held onto an
/// integral representation, [`ValueType::Real`] otherwise; `5` and
/// `5.0` classify differently, which is what the per-type keyword
/// shape rules rely on.
pub fn kind(value: &Value) -> ValueType {
    match value {
        Value::Null => ValueType::Null,
        Value::Bool(_) => ValueType::Bool,
        Value::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
        Value::Number(_) => ValueType::Real,
        Value::String(_) => ValueType::String,
        Value::Array(_) => ValueType::Array,
        Value::Object(_) => ValueType::Object,
    }
}

/// Decode raw schema text into a navigable document.
///
/// # Errors
///
/// [`SchemaError::Decode`] when the text is not valid JSON.
pub fn decode(text: &str) -> Result<Value, SchemaError> {
    Ok(serde_json::from_str(text)?)
}
