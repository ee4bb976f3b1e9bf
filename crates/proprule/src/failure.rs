//! # Failure Map
//!
//! The result of a check: an insertion-ordered mapping from field name to a
//! rendered message, a raw [`Outcome`], or a nested map produced by
//! recursive descent.
//!
//! The checker never hands out an empty map. "No failures" is `None`.

use std::fmt;

use proprule_core::Outcome;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One entry of a failure map.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Failure {
    /// Rendered failure description.
    Message(String),
    /// Failures found inside a nested object.
    Nested(FailureMap),
    /// The validator's outcome, as returned.
    Raw(Outcome),
}

impl Failure {
    /// The rendered message, if this entry is one.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Failure::Message(message) => Some(message),
            _ => None,
        }
    }

    /// The nested map, if this entry is one.
    pub fn as_nested(&self) -> Option<&FailureMap> {
        match self {
            Failure::Nested(map) => Some(map),
            _ => None,
        }
    }

    /// The raw outcome, if this entry is one.
    pub fn as_raw(&self) -> Option<&Outcome> {
        match self {
            Failure::Raw(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn stringify(&self) -> Failure {
        match self {
            Failure::Message(message) => Failure::Message(message.clone()),
            Failure::Nested(map) => Failure::Nested(map.stringify()),
            Failure::Raw(outcome) => Failure::Message(outcome.to_string()),
        }
    }
}

/// Ordered mapping from field name to failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FailureMap {
    entries: Vec<(String, Failure)>,
}

impl FailureMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. A repeated name replaces the earlier entry in place.
    pub fn insert(&mut self, name: impl Into<String>, failure: Failure) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = failure,
            None => self.entries.push((name, failure)),
        }
    }

    /// `None` if empty, otherwise `Some(self)`.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// The failure recorded for a field.
    pub fn get(&self, name: &str) -> Option<&Failure> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Whether a failure is recorded for a field.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in the order they were checked.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in the order they were checked.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy with every raw outcome rendered to its message, recursively.
    pub fn stringify(&self) -> FailureMap {
        FailureMap {
            entries: self
                .entries
                .iter()
                .map(|(name, failure)| (name.clone(), failure.stringify()))
                .collect(),
        }
    }

    /// Every leaf failure as a `(dotted.path, message)` pair, depth-first.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (name, failure) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match failure {
                Failure::Message(message) => out.push((path, message.clone())),
                Failure::Raw(outcome) => out.push((path, outcome.to_string())),
                Failure::Nested(map) => map.flatten_into(&path, out),
            }
        }
    }

    /// Serialize to a JSON string, keeping entry order.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for FailureMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, failure) in &self.entries {
            map.serialize_entry(name, failure)?;
        }
        map.end()
    }
}

impl fmt::Display for FailureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, message)) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}
