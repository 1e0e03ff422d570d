//! Primitive-only property bags

use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A single property value.
///
/// Deliberately closed over JSON primitives: objects and arrays have no
/// representation here, so a `Props` map can never smuggle structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl PropValue {
    /// Convert a JSON value, rejecting anything that is not a primitive
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(PropValue::Null),
            Value::Bool(b) => Some(PropValue::Bool(*b)),
            Value::Number(n) => Some(PropValue::Number(n.clone())),
            Value::String(s) => Some(PropValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view; numeric strings such as `"2"` are accepted too
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => n.as_f64(),
            PropValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Number(n.into())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(PropValue::Null, PropValue::Number)
    }
}

/// Ordered map of property name to primitive value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// String value of `key`, if it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(PropValue::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Merge `other` into `self`; keys in `other` win
    pub fn merge(&mut self, other: Props) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<I: IntoIterator<Item = (String, PropValue)>>(iter: I) -> Self {
        Props(iter.into_iter().collect())
    }
}
