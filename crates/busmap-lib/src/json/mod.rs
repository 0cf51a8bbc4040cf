//! Document value model and parser.
//!
//! This module provides:
//! - [`Value`] - a closed tagged union over the seven document value kinds
//! - [`Document`] - one parsed top-level value with a root accessor
//! - strict accessors that surface shape mismatches as [`Error::TypeMismatch`]
//!
//! Callers are expected to know the expected shape from context; the request
//! orchestrator only asks for shapes the document schema guarantees.

mod parse;
mod print;

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Ordered-by-key mapping of string to value.
pub type Map = BTreeMap<String, Value>;

/// A single document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Variant name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            other => Err(mismatch("bool", other)),
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match self {
            Value::Int(value) => Ok(*value),
            other => Err(mismatch("int", other)),
        }
    }

    /// Numeric accessor; integers widen to floating point.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(value) => Ok(*value),
            Value::Int(value) => Ok(f64::from(*value)),
            other => Err(mismatch("number", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(value) => Ok(value),
            other => Err(mismatch("string", other)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(values) => Ok(values),
            other => Err(mismatch("list", other)),
        }
    }

    pub fn as_map(&self) -> Result<&Map> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(mismatch("map", other)),
        }
    }

    /// Look up a required key in a mapping value.
    pub fn get(&self, key: &'static str) -> Result<&Value> {
        self.as_map()?.get(key).ok_or(Error::MissingKey { key })
    }
}

fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

/// One parsed document: exactly one top-level value.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse one value from the start of `input`. Trailing text after the
    /// value is left unconsumed, mirroring the stream-positioning contract.
    pub fn parse(input: &str) -> Result<Document> {
        let root = parse::parse_value(input)?;
        Ok(Document { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}
