//! The `Value` tree shared by raw spec configuration and evaluation results.
//!
//! Mappings preserve insertion order (spec documents are rendered back in the
//! order they were authored), so the mapping variant is backed by `IndexMap`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A configuration or runtime value.
///
/// `Binary` is representable — spec loaders can produce it, e.g. from a YAML
/// `!!binary` scalar — but carries no expression syntax and is rejected at
/// evaluation time as an unsupported shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
    Binary(Vec<u8>),
}

impl Value {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Binary(_) => "binary",
        }
    }

    /// Truthiness as the assertion checker sees it: `null`, `false`, zero,
    /// and empty strings/sequences/mappings are false, everything else true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Mapping(fields) => !fields.is_empty(),
            Value::Binary(bytes) => !bytes.is_empty(),
        }
    }

    /// Text form used when substituting a span result into surrounding
    /// literal text (interpolation mode).
    ///
    /// Integer-valued numbers print without a decimal point so URLs like
    /// `"http://host:${{ port }}"` render as `:8080`, not `:8080.0`.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::String(s) => s.clone(),
            Value::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(Value::display_string).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Mapping(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.display_string()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Binary(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the mapping content, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::MAX)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Mapping(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = ConfigError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        Ok(match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), serde_json::Value::try_from(v)?)))
                    .collect::<Result<_, ConfigError>>()?,
            ),
            Value::Binary(_) => {
                return Err(ConfigError::UnsupportedShape {
                    type_name: "binary",
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    #[test]
    fn truthiness_table() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Sequence(vec![]).is_truthy());
        assert!(!Value::Mapping(IndexMap::new()).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.5).is_truthy());
        assert!(Value::from("x").is_truthy());
    }

    #[test]
    fn display_integer_number_has_no_decimal_point() {
        assert_eq!(Value::Number(8080.0).display_string(), "8080");
        assert_eq!(Value::Number(1.5).display_string(), "1.5");
    }

    #[test]
    fn display_collections() {
        let seq = Value::Sequence(vec![Value::from(1i64), Value::from("a")]);
        assert_eq!(seq.display_string(), "[1, a]");
        let map = Value::Mapping(indexmap! {
            "status".to_string() => Value::from(200i64),
        });
        assert_eq!(map.display_string(), "{status: 200}");
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let v = Value::from(serde_json::json!({"b": 1, "a": [true, null]}));
        let keys: Vec<&String> = v.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn binary_is_not_convertible_to_json() {
        let v = Value::Binary(vec![0xde, 0xad]);
        assert!(serde_json::Value::try_from(&v).is_err());
    }
}
