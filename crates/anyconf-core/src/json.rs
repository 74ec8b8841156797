//! Strict JSON interchange through `serde_json`.
//!
//! [`Value`] and [`AnyMap`] implement [`serde::Serialize`], so any serde
//! format can write them; `to_json_string` / `to_json_pretty` are the JSON
//! shortcuts. `Boxed` values serialize as their contents. Map entries are
//! written in the map's iteration order.
//!
//! Ingestion goes the other way: a `serde_json::Value` tree is converted with
//! every object becoming an [`AnyMap`] of the requested [`Strategy`]. JSON
//! `null` has no counterpart and is rejected with the offending path.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{AnyError, Result};
use crate::map::{AnyMap, Strategy};
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Boxed(inner) => inner.serialize(serializer),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for AnyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

impl Value {
    /// Compact, grammar-compliant JSON.
    ///
    /// ```
    /// use anyconf_core::Value;
    ///
    /// let v = Value::from(vec![Value::from("a b"), Value::from(true)]);
    /// assert_eq!(v.to_json_string().unwrap(), r#"["a b",true]"#);
    /// ```
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON text into a value, building maps with `strategy`.
    pub fn from_json_str(json: &str, strategy: Strategy) -> Result<Value> {
        let parsed: JsonValue = serde_json::from_str(json)?;
        Value::from_serde(&parsed, strategy)
    }

    /// Convert an already-parsed JSON tree, building maps with `strategy`.
    pub fn from_serde(json: &JsonValue, strategy: Strategy) -> Result<Value> {
        convert(json, strategy, "")
    }
}

impl AnyMap {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Dotted location of a child, used in error messages.
fn child_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", parent, segment)
    }
}

fn convert(json: &JsonValue, strategy: Strategy, path: &str) -> Result<Value> {
    match json {
        JsonValue::Null => Err(AnyError::UnsupportedNull {
            path: path.to_string(),
        }),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => Ok(match n.as_i64() {
            Some(i) => Value::Integer(i),
            // u64 above i64::MAX and non-integers
            None => Value::Real(n.as_f64().unwrap_or(f64::NAN)),
        }),
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| convert(item, strategy, &child_path(path, &i.to_string())))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        JsonValue::Object(fields) => {
            let mut map = AnyMap::with_strategy(strategy);
            for (key, field) in fields {
                let value = convert(field, strategy, &child_path(path, key))?;
                map.insert_or_assign(key.as_str(), value);
            }
            Ok(Value::Map(map))
        }
    }
}
