//! # Process-wide Registry
//!
//! A lazily initialised default [`RuleRegistry`] and free functions over it,
//! for code that registers rules during start-up and checks objects later
//! without threading a registry through.
//!
//! Registration is expected to finish before checks start. The lock exists
//! so the registry can be a `static`; it is not a concurrent-writer protocol.
//! A poisoned lock is recovered: the registry holds no invariant that a
//! panicking reader could have broken.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;

use proprule_core::{Candidate, RuleError, TypeKey, Value};

use crate::checker::Checker;
use crate::failure::FailureMap;
use crate::options::CheckOptions;
use crate::registry::{RuleRegistry, RuleTable};

static REGISTRY: OnceCell<RwLock<RuleRegistry>> = OnceCell::new();

fn registry() -> &'static RwLock<RuleRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(RuleRegistry::new()))
}

/// Run `f` with shared access to the process-wide registry.
pub fn with_registry<R>(f: impl FnOnce(&RuleRegistry) -> R) -> R {
    let guard = registry().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Run `f` with exclusive access to the process-wide registry.
pub fn with_registry_mut<R>(f: impl FnOnce(&mut RuleRegistry) -> R) -> R {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Declare a type in the process-wide registry.
///
/// # Errors
///
/// See [`RuleRegistry::declare`].
pub fn declare(key: impl Into<TypeKey>, parent: Option<&TypeKey>) -> Result<(), RuleError> {
    with_registry_mut(|r| r.declare(key, parent))
}

/// Register a rule in the process-wide registry.
///
/// # Errors
///
/// See [`RuleRegistry::register`].
pub fn register(
    owner: &TypeKey,
    field: impl Into<String>,
    candidate: impl Into<Candidate>,
) -> Result<(), RuleError> {
    with_registry_mut(|r| r.register(owner, field, candidate))
}

/// The effective rule table for `target`'s runtime type.
pub fn lookup(target: &Value) -> Option<Arc<RuleTable>> {
    with_registry(|r| r.lookup(target))
}

/// Check `target` against the process-wide registry.
pub fn check(target: &Value, options: &CheckOptions) -> Option<FailureMap> {
    with_registry(|r| Checker::new(r).check(target, options))
}
