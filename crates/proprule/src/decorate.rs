//! # Field Decorators and Type Definitions
//!
//! The declarative registration step. [`rule`] is the decoration entry
//! point: it verifies a validator once and returns a [`FieldRule`] that can
//! be applied to any `(owner, field)` pair. [`TypeBuilder`] is the per-type
//! static initialiser that declares a type, attaches its field rules and
//! records the initial field values its instances start with.
//!
//! ```
//! use proprule::{rule, RuleRegistry};
//! use proprule_core::validators as v;
//!
//! let mut registry = RuleRegistry::new();
//! let person = registry
//!     .define("Person")?
//!     .validated("name", rule(v::string())?, "imcuttle")
//!     .validated("age", rule(v::number())?, 19)
//!     .build();
//! assert_eq!(person.instantiate().len(), 2);
//! # Ok::<(), proprule_core::RuleError>(())
//! ```

use std::sync::Arc;

use proprule_core::{verify_candidate, Candidate, Object, Rule, RuleError, TypeKey, Value};

use crate::registry::RuleRegistry;

/// A field as declared on a type: its name and initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Value new instances start with. `Undefined` for a bare declaration.
    pub initial: Value,
}

impl FieldDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, initial: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
        }
    }
}

/// A verified validator ready to be attached to fields.
#[derive(Debug, Clone)]
pub struct FieldRule {
    rule: Rule,
}

/// Decoration entry point: verify a validator and wrap it as a field rule.
///
/// # Errors
///
/// Returns `RuleError::InvalidValidator` if the candidate does not satisfy
/// the `Validate` capability. Verification happens here, once; applying the
/// returned rule never re-checks.
pub fn rule(candidate: impl Into<Candidate>) -> Result<FieldRule, RuleError> {
    verify_candidate(candidate.into()).map(|rule| FieldRule { rule })
}

impl FieldRule {
    /// The wrapped validator.
    pub fn validator(&self) -> &Rule {
        &self.rule
    }

    /// Attach the rule to `descriptor.name` on `owner` and hand the
    /// descriptor back unchanged.
    pub fn apply(
        &self,
        registry: &mut RuleRegistry,
        owner: &TypeKey,
        descriptor: FieldDescriptor,
    ) -> FieldDescriptor {
        registry.attach(owner, descriptor.name.clone(), Arc::clone(&self.rule));
        descriptor
    }
}

/// A declared type: its key and the fields its instances carry.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    key: TypeKey,
    fields: Vec<FieldDescriptor>,
}

impl TypeDef {
    /// The type's identity.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Declared fields, inherited ones first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// A new instance with every declared field set to its initial value.
    pub fn instantiate(&self) -> Object {
        let mut obj = Object::of(self.key.clone());
        for field in &self.fields {
            obj.set(field.name.clone(), field.initial.clone());
        }
        obj
    }

    /// [`instantiate`](Self::instantiate) wrapped as a `Value`.
    pub fn instance(&self) -> Value {
        Value::Object(self.instantiate())
    }
}

/// Builder returned by [`RuleRegistry::define`] and friends.
#[derive(Debug)]
pub struct TypeBuilder<'r> {
    registry: &'r mut RuleRegistry,
    key: TypeKey,
    fields: Vec<FieldDescriptor>,
}

impl<'r> TypeBuilder<'r> {
    /// Declare a plain field with no rule of its own.
    pub fn field(mut self, name: impl Into<String>, initial: impl Into<Value>) -> Self {
        self.put(FieldDescriptor::new(name, initial));
        self
    }

    /// Declare a field guarded by `rule`.
    pub fn validated(
        mut self,
        name: impl Into<String>,
        rule: FieldRule,
        initial: impl Into<Value>,
    ) -> Self {
        let descriptor = rule.apply(
            self.registry,
            &self.key,
            FieldDescriptor::new(name, initial),
        );
        self.put(descriptor);
        self
    }

    /// Finish the definition.
    pub fn build(self) -> TypeDef {
        TypeDef {
            key: self.key,
            fields: self.fields,
        }
    }

    // A redeclared (inherited) field keeps its position and takes the new initial value.
    fn put(&mut self, descriptor: FieldDescriptor) {
        match self.fields.iter_mut().find(|f| f.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => self.fields.push(descriptor),
        }
    }
}

impl RuleRegistry {
    /// Start defining a root type.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::TypeRedeclared` if `key` exists with a parent.
    pub fn define(&mut self, key: impl Into<TypeKey>) -> Result<TypeBuilder<'_>, RuleError> {
        let key = key.into();
        self.declare(key.clone(), None)?;
        Ok(TypeBuilder {
            registry: self,
            key,
            fields: Vec::new(),
        })
    }

    /// Start defining a subtype of `parent`, inheriting its fields.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownParent` or `RuleError::TypeRedeclared`.
    pub fn define_subtype(
        &mut self,
        parent: &TypeDef,
        key: impl Into<TypeKey>,
    ) -> Result<TypeBuilder<'_>, RuleError> {
        let mut builder = self.define_under(parent.key(), key)?;
        builder.fields = parent.fields.clone();
        Ok(builder)
    }

    /// Start defining a subtype of a declared type whose field list is not
    /// known here. Rules are still inherited.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownParent` or `RuleError::TypeRedeclared`.
    pub fn define_under(
        &mut self,
        parent: &TypeKey,
        key: impl Into<TypeKey>,
    ) -> Result<TypeBuilder<'_>, RuleError> {
        let key = key.into();
        self.declare(key.clone(), Some(parent))?;
        Ok(TypeBuilder {
            registry: self,
            key,
            fields: Vec::new(),
        })
    }
}
