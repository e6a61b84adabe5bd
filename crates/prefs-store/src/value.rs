use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A value in the store's own loosely-typed representation.
///
/// Every backend can hold these directly. Structured values that don't map onto this shape are
/// encoded to bytes first and stored as [`NativeValue::Data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NativeValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An opaque byte blob.
    Data(#[serde(with = "serde_bytes")] Vec<u8>),
    /// A point in time.
    Date(DateTime<Utc>),
    /// An ordered list of values.
    Array(Vec<NativeValue>),
    /// A string-keyed map of values.
    Dictionary(BTreeMap<String, NativeValue>),
}

impl NativeValue {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Bool(_) => "bool",
            NativeValue::Integer(_) => "integer",
            NativeValue::Float(_) => "float",
            NativeValue::String(_) => "string",
            NativeValue::Data(_) => "data",
            NativeValue::Date(_) => "date",
            NativeValue::Array(_) => "array",
            NativeValue::Dictionary(_) => "dictionary",
        }
    }

    /// Returns the bytes if this is a [`NativeValue::Data`].
    pub fn into_data(self) -> Option<Vec<u8>> {
        match self {
            NativeValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }
}
