//! # Registration Errors
//!
//! Errors raised when declaring types or registering rules. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Registration errors are fatal for the caller and surface immediately.
//!   They are raised before any registry mutation happens.
//! - Validation failures are never errors. They are data, reported through
//!   the failure map, so a batch of field failures is always reported together.

use thiserror::Error;

/// Component name used as the prefix of registration error messages.
pub const COMPONENT: &str = "proprule";

/// Error raised while registering rules or declaring types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The registration argument does not satisfy the `Validate` capability.
    #[error("{component}: validator requires an instance satisfying the Validator capability, but {actual}")]
    InvalidValidator {
        /// Component that rejected the argument.
        component: String,
        /// Rendering of the rejected argument.
        actual: String,
    },

    /// A type was declared with a parent that the registry does not know.
    #[error("{component}: type '{child}' extends unknown type '{parent}'")]
    UnknownParent {
        /// Component that rejected the declaration.
        component: String,
        /// The type being declared.
        child: String,
        /// The missing parent type.
        parent: String,
    },

    /// A type was declared twice with different parents.
    #[error("{component}: type '{key}' is already declared with a different parent")]
    TypeRedeclared {
        /// Component that rejected the declaration.
        component: String,
        /// The conflicting type.
        key: String,
    },
}

impl RuleError {
    /// Build an `InvalidValidator` error for the given rendering of the argument.
    pub fn invalid_validator(actual: impl Into<String>) -> Self {
        Self::InvalidValidator {
            component: COMPONENT.to_string(),
            actual: actual.into(),
        }
    }

    /// Build an `UnknownParent` error.
    pub fn unknown_parent(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnknownParent {
            component: COMPONENT.to_string(),
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// Build a `TypeRedeclared` error.
    pub fn type_redeclared(key: impl Into<String>) -> Self {
        Self::TypeRedeclared {
            component: COMPONENT.to_string(),
            key: key.into(),
        }
    }
}
