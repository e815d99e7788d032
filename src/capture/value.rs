//! Captured runtime value representation
//!
//! This module defines the [`Value`] enum, a typed snapshot of a local variable
//! taken from the failing process. Hosts that already have their own value
//! types can implement [`Inspect`] directly instead.
//!
//! # Value Types
//!
//! - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`],
//!   [`Value::Str`], [`Value::Bytes`]: scalars
//! - [`Value::List`]: ordered elements
//! - [`Value::Map`]: key/value pairs with arbitrary keys, in capture order
//! - [`Value::Record`]: named fields of an object, in no particular order
//!
//! Both `Map` and `Record` are mapping-like; formatting sorts their entries.
//!
//! # Serialized form
//!
//! Values serialize losslessly as `{"type": ..., "data": ...}` objects, so a
//! value placed in a page context can be decoded again with every key type,
//! byte string and non-finite float intact. Inside a page context the outer
//! value is wrapped in a single-entry `{"$captured": ...}` object, which is
//! what tells the `var_table` helper to decode it instead of formatting the
//! JSON as it stands.

use crate::errors::ReprError;
use crate::render::inspect::{quote_str, Inspect, Shape, SortKey};
use crate::render::{pretty, DEFAULT_MAX_DEPTH};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Key of the wrapper object around a captured value in a page context
pub const CAPTURED_KEY: &str = "$captured";

/// A captured runtime value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "float_text")] f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    /// Field name -> field value
    Record(#[serde(serialize_with = "sorted_fields")] FxHashMap<String, Value>),
}

impl Value {
    /// Build a record from `(field, value)` pairs
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Recover a value from its wrapped page-context form.
    ///
    /// Returns `None` if `json` is not a `{"$captured": ...}` object, i.e. it is
    /// plain page data, and `Some(Err(..))` if the wrapper holds something that
    /// does not decode.
    pub fn from_captured(json: &serde_json::Value) -> Option<Result<Value, serde_json::Error>> {
        let object = json.as_object().filter(|object| object.len() == 1)?;
        let inner = object.get(CAPTURED_KEY)?;
        Some(Value::deserialize(inner))
    }
}

#[derive(Serialize)]
struct Captured<'a> {
    #[serde(rename = "$captured")]
    value: &'a Value,
}

/// Serialize a value wrapped for a page context, see [`Value::from_captured`]
pub(crate) fn serialize_captured<S: Serializer>(
    value: &Value,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Captured { value }.serialize(serializer)
}

fn sorted_fields<S: Serializer>(
    fields: &FxHashMap<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    fields.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// JSON has no NaN or infinities; those are written as text
mod float_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\'' => out.push_str("\\'"),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b.is_ascii_graphic() || b == b' ' => out.push(b as char),
            b => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push('\'');
    out
}

impl Inspect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::List(items) => {
                Shape::Sequence(items.iter().map(|v| v as &dyn Inspect).collect())
            }
            Value::Map(entries) => Shape::Mapping(
                entries
                    .iter()
                    .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
                    .collect(),
            ),
            Value::Record(fields) => Shape::Mapping(
                fields
                    .iter()
                    .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
                    .collect(),
            ),
            _ => Shape::Scalar,
        }
    }

    fn repr(&self) -> Result<String, ReprError> {
        match self {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(f) => Ok(format!("{:?}", f)),
            Value::Str(s) => Ok(quote_str(s)),
            Value::Bytes(b) => Ok(quote_bytes(b)),
            Value::List(_) | Value::Map(_) | Value::Record(_) => {
                pretty::repr(self, DEFAULT_MAX_DEPTH)
            }
        }
    }

    fn sort_key(&self) -> SortKey {
        match self {
            Value::Bool(b) => SortKey::Int(i64::from(*b)),
            Value::Int(n) => SortKey::Int(*n),
            Value::Float(f) => SortKey::Number(*f),
            Value::Str(s) => SortKey::Text(s.clone()),
            other => SortKey::Text(other.repr().unwrap_or_default()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
