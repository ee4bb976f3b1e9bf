//! # proprule-core — Foundational Types for proprule
//!
//! This crate defines the primitives the rule registry and the traversal
//! checker are built on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Metadata lives out-of-band.** An [`Object`] holds data fields and a
//!    runtime [`TypeKey`]; rules are keyed by that type elsewhere. Field
//!    enumeration can never observe rule metadata.
//!
//! 2. **One capability.** Every validator implements [`Validate`]. The
//!    capability is verified once, at registration, by [`verify_candidate`].
//!
//! 3. **Failures are data.** [`Outcome`] reports pass/fail; only registration
//!    mistakes are errors ([`RuleError`]).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `proprule` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod outcome;
pub mod validator;
pub mod validators;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{RuleError, COMPONENT};
pub use identity::TypeKey;
pub use outcome::Outcome;
pub use validator::{is_valid_validator, verify_candidate, Candidate, Rule, Validate};
pub use value::{Object, Value};
