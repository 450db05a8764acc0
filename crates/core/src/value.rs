//! Scalar values and their stored text representation.

use serde::{Deserialize, Serialize};

use crate::error::{RedmapError, Result};
use crate::types::FieldKind;

/// A scalar field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 string.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Str(_) => FieldKind::Str,
            Value::Int(_) => FieldKind::Int,
            Value::Bool(_) => FieldKind::Bool,
        }
    }

    /// Stored text representation: strings pass through, integers print
    /// decimal, booleans encode as `"1"` / `"0"`.
    pub fn format(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
        }
    }

    /// Parse stored text back into a value of the given scalar kind.
    ///
    /// `attr` only feeds error context. Asking for a non-scalar kind is
    /// a caller bug and reported as invalid input: reference pointers
    /// and container ids are keys, not values.
    pub fn parse(kind: FieldKind, attr: &str, text: &str) -> Result<Value> {
        match kind {
            FieldKind::Str => Ok(Value::Str(text.to_string())),
            FieldKind::Int => text.parse::<i64>().map(Value::Int).map_err(|_| {
                RedmapError::Parse {
                    attr: attr.to_string(),
                    kind,
                    value: text.to_string(),
                }
            }),
            FieldKind::Bool => match text {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                _ => Err(RedmapError::Parse {
                    attr: attr.to_string(),
                    kind,
                    value: text.to_string(),
                }),
            },
            FieldKind::Ref | FieldKind::StrList => Err(RedmapError::invalid_input(format!(
                "attribute '{attr}': {kind} is not a scalar kind"
            ))),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
