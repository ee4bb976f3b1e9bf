//! # proprule — Per-property Validation Rules
//!
//! Attach validation rules to the fields of a type, then check instances and
//! get back an ordered map of field names to failures.
//!
//! ## Rule Registry (`registry`, `decorate`, `document`)
//!
//! Rules are registered per type, once, when the type is defined. Subtypes
//! inherit their parent's rules; the first rule a subtype registers itself
//! triggers a copy-on-write clone of the inherited table, so a subtype can
//! never alter its parent or its siblings. Key entry points:
//!
//! - [`rule`]: verify a validator and produce a [`FieldRule`].
//! - [`RuleRegistry::define`] / [`RuleRegistry::define_subtype`]: type builders.
//! - [`RuleDocument`]: the same declarations from YAML or JSON.
//!
//! ## Traversal Checker (`checker`, `options`, `failure`)
//!
//! [`Checker::check`] resolves the field list (includes, excludes, order),
//! applies each rule, descends into nested objects in recursive mode, and
//! returns `None` or a non-empty [`FailureMap`].
//!
//! ```
//! use proprule::{rule, CheckOptions, Checker, RuleRegistry};
//! use proprule_core::validators as v;
//!
//! let mut registry = RuleRegistry::new();
//! let person = registry
//!     .define("Person")?
//!     .validated("name", rule(v::string())?, "imcuttle")
//!     .validated("age", rule(v::number())?, 19)
//!     .validated("gender", rule(v::one_of(["M", "F"]))?, "X")
//!     .build();
//!
//! let failures = Checker::new(&registry)
//!     .check(&person.instance(), &CheckOptions::default())
//!     .expect("gender fails");
//! assert_eq!(failures.to_string(), "gender: expected: oneOf(['M', 'F']), actual: 'X'.");
//! # Ok::<(), proprule_core::RuleError>(())
//! ```
//!
//! ## Process-wide registry (`global`)
//!
//! [`global`] offers the same operations over a lazily initialised static
//! registry.
//!
//! ## Crate Policy
//!
//! - Depends only on `proprule-core` internally.
//! - Validation failures are data, never errors. Only registration fails.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checker;
pub mod decorate;
pub mod document;
pub mod error;
pub mod failure;
pub mod global;
pub mod options;
pub mod registry;

pub use checker::Checker;
pub use decorate::{rule, FieldDescriptor, FieldRule, TypeBuilder, TypeDef};
pub use document::{FieldDocument, RuleDocument, TypeDocument};
pub use error::DocumentError;
pub use failure::{Failure, FailureMap};
pub use options::CheckOptions;
pub use registry::{RuleRegistry, RuleTable};
