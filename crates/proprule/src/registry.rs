//! # Rule Registry
//!
//! Associates field names with validators, per type, with inheritance.
//!
//! ## Storage
//!
//! The registry is an arena keyed by [`TypeKey`]. Each entry records the
//! type's parent and, once the type registers a rule itself, its own
//! [`RuleTable`]. Rules never live on the objects being checked.
//!
//! ## Copy-on-write inheritance
//!
//! A type that has not registered anything resolves to its nearest
//! ancestor's table, live. The first registration on a type clones the
//! inherited table (a shallow copy: rule handles are shared) and inserts
//! into the clone. From then on the type owns a private table, so:
//!
//! - overriding a field on a subtype never alters the supertype,
//! - sibling subtypes never observe each other's rules,
//! - tables handed out by [`RuleRegistry::lookup`] are immutable snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use proprule_core::{verify_candidate, Candidate, Rule, RuleError, TypeKey, Value};

/// Insertion-ordered mapping from field name to rule. Keys are unique.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: Vec<(String, Rule)>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule registered for a field.
    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    /// Whether a rule is registered for a field.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Insert or override a rule. An overridden field keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, rule: Rule) -> Option<Rule> {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, rule)),
            None => {
                self.entries.push((field, rule));
                None
            }
        }
    }

    /// Field names in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct TypeEntry {
    parent: Option<TypeKey>,
    own: Option<Arc<RuleTable>>,
}

/// Per-type rule tables with copy-on-write inheritance.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    types: HashMap<TypeKey, TypeEntry>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type, optionally extending a previously declared parent.
    ///
    /// Declaring the same type again with the same parent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownParent` if `parent` was never declared, and
    /// `RuleError::TypeRedeclared` if `key` exists with a different parent.
    pub fn declare(
        &mut self,
        key: impl Into<TypeKey>,
        parent: Option<&TypeKey>,
    ) -> Result<(), RuleError> {
        let key = key.into();
        if let Some(parent) = parent {
            if !self.types.contains_key(parent) {
                return Err(RuleError::unknown_parent(key.as_str(), parent.as_str()));
            }
        }
        if let Some(existing) = self.types.get(&key) {
            return if existing.parent.as_ref() == parent {
                Ok(())
            } else {
                Err(RuleError::type_redeclared(key.as_str()))
            };
        }
        tracing::debug!(type_key = %key, parent = ?parent.map(TypeKey::as_str), "declared type");
        self.types.insert(
            key,
            TypeEntry {
                parent: parent.cloned(),
                own: None,
            },
        );
        Ok(())
    }

    /// Whether the type has been declared (explicitly or by registration).
    pub fn is_declared(&self, key: &TypeKey) -> bool {
        self.types.contains_key(key)
    }

    /// The declared parent of a type.
    pub fn parent_of(&self, key: &TypeKey) -> Option<&TypeKey> {
        self.types.get(key).and_then(|entry| entry.parent.as_ref())
    }

    /// Whether the type owns a private table (has registered a rule itself).
    pub fn owns_table(&self, key: &TypeKey) -> bool {
        self.types.get(key).is_some_and(|entry| entry.own.is_some())
    }

    /// Associate a validator with `field` on `owner`.
    ///
    /// The candidate is verified before anything is touched. An undeclared
    /// owner is declared as a root type.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidValidator` if the candidate does not satisfy
    /// the `Validate` capability. The registry is left unchanged.
    pub fn register(
        &mut self,
        owner: &TypeKey,
        field: impl Into<String>,
        candidate: impl Into<Candidate>,
    ) -> Result<(), RuleError> {
        let rule = verify_candidate(candidate.into())?;
        self.attach(owner, field.into(), rule);
        Ok(())
    }

    /// Insert an already verified rule, cloning the inherited table first if
    /// `owner` does not own one yet.
    pub(crate) fn attach(&mut self, owner: &TypeKey, field: String, rule: Rule) {
        let inherited = self.effective_table(owner);
        let entry = self.types.entry(owner.clone()).or_default();
        let table = entry.own.get_or_insert_with(|| {
            tracing::debug!(
                type_key = %owner,
                inherited = inherited.as_ref().map_or(0, |t| t.len()),
                "creating private rule table"
            );
            Arc::new(inherited.map(|t| (*t).clone()).unwrap_or_default())
        });
        tracing::debug!(type_key = %owner, field = %field, rule = %rule.describe(), "registered rule");
        Arc::make_mut(table).insert(field, rule);
    }

    /// The effective table of a type: its own, or its nearest ancestor's.
    /// `None` if neither the type nor any ancestor registered anything.
    pub fn table_for(&self, key: &TypeKey) -> Option<Arc<RuleTable>> {
        self.effective_table(key).filter(|table| !table.is_empty())
    }

    /// The effective table for a value's runtime type.
    ///
    /// Never fails: non-objects, untyped objects and types without rules
    /// all resolve to `None`.
    pub fn lookup(&self, target: &Value) -> Option<Arc<RuleTable>> {
        target.type_key().and_then(|key| self.table_for(key))
    }

    fn effective_table(&self, key: &TypeKey) -> Option<Arc<RuleTable>> {
        let mut current = Some(key);
        while let Some(key) = current {
            let entry = self.types.get(key)?;
            if let Some(table) = &entry.own {
                return Some(Arc::clone(table));
            }
            current = entry.parent.as_ref();
        }
        None
    }
}
