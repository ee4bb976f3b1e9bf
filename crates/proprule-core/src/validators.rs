//! # Built-in Validators
//!
//! A deliberately small library of type and membership checks. Applications
//! are expected to bring their own [`Validate`] implementations; these cover
//! the common cases and the declarative descriptor format.
//!
//! Messages follow one shape so failure maps read uniformly:
//!
//! - type checks: `expected type: number, actual type: string.`
//! - membership: `expected: oneOf(['M', 'F']), actual: 'X'.`
//! - predicates: `expected: <name>, actual: <literal>.`

use std::fmt;
use std::sync::Arc;

use crate::outcome::Outcome;
use crate::validator::{Rule, Validate};
use crate::value::Value;

/// Primitive type a [`TypeCheck`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `Value::String`.
    String,
    /// `Value::Int` or `Value::Float`.
    Number,
    /// `Value::Bool`.
    Boolean,
}

impl Primitive {
    fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Primitive::String => matches!(value, Value::String(_)),
            Primitive::Number => value.is_number(),
            Primitive::Boolean => matches!(value, Value::Bool(_)),
        }
    }
}

/// Strict primitive type check. No coercion: `'123'` is not a number.
#[derive(Debug, Clone, Copy)]
pub struct TypeCheck(pub Primitive);

impl Validate for TypeCheck {
    fn check(&self, value: &Value) -> Outcome {
        if self.0.accepts(value) {
            Outcome::pass()
        } else {
            Outcome::fail(format!(
                "expected type: {}, actual type: {}.",
                self.0.name(),
                value.type_name()
            ))
        }
    }

    fn describe(&self) -> String {
        self.0.name().to_string()
    }
}

/// Membership check against a fixed list of allowed values.
#[derive(Debug, Clone)]
pub struct OneOf(pub Vec<Value>);

// Numbers compare by numeric value, so `1` and `1.0` are the same member.
fn same_member(allowed: &Value, value: &Value) -> bool {
    match (allowed, value) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        _ => allowed == value,
    }
}

impl Validate for OneOf {
    fn check(&self, value: &Value) -> Outcome {
        if self.0.iter().any(|allowed| same_member(allowed, value)) {
            Outcome::pass()
        } else {
            Outcome::fail(format!(
                "expected: {}, actual: {}.",
                self.describe(),
                value.literal()
            ))
        }
    }

    fn describe(&self) -> String {
        format!("oneOf({})", Value::Array(self.0.clone()).literal())
    }
}

/// A named predicate.
pub struct Custom {
    name: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}

impl Validate for Custom {
    fn check(&self, value: &Value) -> Outcome {
        if (self.predicate)(value) {
            Outcome::pass()
        } else {
            Outcome::fail(format!("expected: {}, actual: {}.", self.name, value.literal()))
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Strict string check.
pub fn string() -> Rule {
    Arc::new(TypeCheck(Primitive::String))
}

/// Strict number check (integers and floats).
pub fn number() -> Rule {
    Arc::new(TypeCheck(Primitive::Number))
}

/// Strict boolean check.
pub fn boolean() -> Rule {
    Arc::new(TypeCheck(Primitive::Boolean))
}

/// Membership check.
pub fn one_of<I, V>(allowed: I) -> Rule
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Arc::new(OneOf(allowed.into_iter().map(Into::into).collect()))
}

/// Named predicate check.
pub fn custom<F>(name: impl Into<String>, predicate: F) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Arc::new(Custom {
        name: name.into(),
        predicate: Box::new(predicate),
    })
}

/// Resolve a declarative descriptor.
///
/// Recognised shapes:
///
/// - `{"type": "string" | "number" | "boolean"}`
/// - `{"oneOf": [ ... ]}`
///
/// Anything else, including `{}`, is not a validator.
pub fn from_descriptor(descriptor: &serde_json::Value) -> Option<Rule> {
    let map = descriptor.as_object()?;
    if map.len() != 1 {
        return None;
    }
    if let Some(ty) = map.get("type") {
        return match ty.as_str()? {
            "string" => Some(string()),
            "number" => Some(number()),
            "boolean" => Some(boolean()),
            _ => None,
        };
    }
    let allowed = map.get("oneOf")?.as_array()?;
    Some(one_of(allowed.iter().cloned().map(Value::from)))
}
