//! # Dynamic Values
//!
//! The object model the checker traverses. A [`Value`] is a dynamically
//! typed datum; an [`Object`] is an insertion-ordered set of named fields
//! with an optional runtime [`TypeKey`].
//!
//! ## Absent vs. undefined
//!
//! `Value::Undefined` is a real value: an object may own a field whose value
//! is undefined. A field the object does not own at all is *absent*, which
//! [`Object::get`] reports as `None`. The checker's suppression options
//! treat the two cases separately.
//!
//! ## Metadata separation
//!
//! Objects hold data fields only. Rule metadata lives in the registry, keyed
//! by `TypeKey`, so enumerating an object's keys never exposes it.

use std::fmt::Write as _;

use crate::identity::TypeKey;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// A present field holding no value.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer number.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered list. Arrays are never traversed element-wise.
    Array(Vec<Value>),
    /// A structured object, possibly carrying a runtime type.
    Object(Object),
}

impl Value {
    /// Returns `true` for `Value::Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Borrow the inner object, if this is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Mutably borrow the inner object, if this is one.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the inner string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The runtime type of an object value, if any.
    pub fn type_key(&self) -> Option<&TypeKey> {
        self.as_object().and_then(Object::type_key)
    }

    /// Look up a field on an object value. Non-objects own no fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(name))
    }

    /// Enumerable field names. Only objects have any.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Value::Object(obj) => obj.keys().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Type name used in validator messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Render the value as a literal for messages, e.g. `'X'`, `19`, `['M', 'F']`.
    pub fn literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    fn write_literal(&self, out: &mut String) {
        match self {
            Value::Undefined => out.push_str("undefined"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Value::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(f) => {
                let _ = write!(out, "{f}");
            }
            Value::String(s) => {
                out.push('\'');
                out.push_str(&s.replace('\'', "\\'"));
                out.push('\'');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_literal(out);
                }
                out.push(']');
            }
            Value::Object(obj) => {
                if let Some(key) = obj.type_key() {
                    let _ = write!(out, "{key} ");
                }
                if obj.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{ ");
                for (i, (name, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(": ");
                    value.write_literal(out);
                }
                out.push_str(" }");
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.literal())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
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
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut obj = Object::new();
                for (name, value) in map {
                    obj.set(name, Value::from(value));
                }
                Value::Object(obj)
            }
        }
    }
}

/// An insertion-ordered collection of named fields with an optional runtime type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    type_key: Option<TypeKey>,
    fields: Vec<(String, Value)>,
}

impl Object {
    /// Create an untyped, empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object of the given runtime type.
    pub fn of(type_key: impl Into<TypeKey>) -> Self {
        Self {
            type_key: Some(type_key.into()),
            fields: Vec::new(),
        }
    }

    /// The runtime type of this object, if any.
    pub fn type_key(&self) -> Option<&TypeKey> {
        self.type_key.as_ref()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, returning the previous value. An existing field keeps
    /// its position; a new field is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Look up a field the object owns.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Mutably look up a field the object owns.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether the object owns a field with this name (even if undefined).
    pub fn has(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Undefined),
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            "[a-zA-Z0-9_' ]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,8}", inner), 0..6).prop_map(|fields| {
                    let mut obj = Object::new();
                    for (name, value) in fields {
                        obj.set(name, value);
                    }
                    Value::Object(obj)
                }),
            ]
        })
    }

    proptest! {
        /// Keys are unique and follow first-insertion order.
        #[test]
        fn object_keys_are_unique(fields in prop::collection::vec(("[a-c]", any::<i64>()), 0..12)) {
            let mut obj = Object::new();
            for (name, n) in &fields {
                obj.set(name.clone(), *n);
            }
            let keys: Vec<&str> = obj.keys().collect();
            let mut expected: Vec<&str> = Vec::new();
            for (name, _) in &fields {
                if !expected.contains(&name.as_str()) {
                    expected.push(name.as_str());
                }
            }
            prop_assert_eq!(keys, expected);
        }

        /// Rendering a literal never panics and is deterministic.
        #[test]
        fn literal_is_deterministic(value in value_strategy()) {
            prop_assert_eq!(value.literal(), value.clone().literal());
        }
    }
}
