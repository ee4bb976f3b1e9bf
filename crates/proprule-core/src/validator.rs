//! # The Validate Capability
//!
//! Anything that can decide whether a single value passes implements
//! [`Validate`]. The checker decides *when* and *in what order* validators
//! run; a validator alone decides pass or fail.
//!
//! ## Registration-time verification
//!
//! The registration entry point accepts a [`Candidate`] rather than a bare
//! validator, because rules may also arrive as declarative descriptors or be
//! missing altogether. [`verify_candidate`] is the single capability check:
//! it runs once, at registration, before any registry mutation.

use std::fmt;
use std::sync::Arc;

use crate::error::RuleError;
use crate::outcome::Outcome;
use crate::validators;
use crate::value::Value;

/// A per-value check.
pub trait Validate: fmt::Debug + Send + Sync {
    /// Check a single value.
    fn check(&self, value: &Value) -> Outcome;

    /// Short description used in messages and diagnostics (e.g. `"string"`).
    fn describe(&self) -> String;

    /// Capability marker. A validator reporting `false` is refused at
    /// registration and skipped, with a warning, during traversal.
    fn is_verifiable(&self) -> bool {
        true
    }
}

/// Shared handle to a validator. Rule tables clone handles, never validators.
pub type Rule = Arc<dyn Validate>;

/// The argument of the registration entry point.
#[derive(Debug, Clone)]
pub enum Candidate {
    /// A validator object.
    Rule(Rule),
    /// A declarative rule description, resolved by the built-in library.
    Descriptor(serde_json::Value),
    /// No validator was supplied.
    Absent,
}

impl From<Rule> for Candidate {
    fn from(rule: Rule) -> Self {
        Candidate::Rule(rule)
    }
}

impl From<&Rule> for Candidate {
    fn from(rule: &Rule) -> Self {
        Candidate::Rule(Arc::clone(rule))
    }
}

impl From<serde_json::Value> for Candidate {
    fn from(descriptor: serde_json::Value) -> Self {
        Candidate::Descriptor(descriptor)
    }
}

impl From<Option<Rule>> for Candidate {
    fn from(rule: Option<Rule>) -> Self {
        rule.map_or(Candidate::Absent, Candidate::Rule)
    }
}

/// Whether a registered rule still satisfies the capability.
pub fn is_valid_validator(rule: &Rule) -> bool {
    rule.is_verifiable()
}

/// Resolve a registration argument into a rule, or reject it.
///
/// # Errors
///
/// Returns `RuleError::InvalidValidator` when the candidate is absent, is a
/// validator whose capability marker is unset, or is a descriptor the
/// built-in library does not recognise.
pub fn verify_candidate(candidate: Candidate) -> Result<Rule, RuleError> {
    match candidate {
        Candidate::Rule(rule) if is_valid_validator(&rule) => Ok(rule),
        Candidate::Rule(rule) => Err(RuleError::invalid_validator(format!("{rule:?}"))),
        Candidate::Descriptor(descriptor) => validators::from_descriptor(&descriptor)
            .ok_or_else(|| RuleError::invalid_validator(descriptor.to_string())),
        Candidate::Absent => Err(RuleError::invalid_validator("undefined")),
    }
}
