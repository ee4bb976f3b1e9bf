//! # Traversal Checker
//!
//! Walks a target's fields, applies each field's rule, descends into nested
//! objects in recursive mode, and assembles the [`FailureMap`].
//!
//! ## Field resolution
//!
//! 1. `includes`, when non-empty, is the candidate list verbatim (names need
//!    not be registered). Otherwise the candidates are the target's own keys
//!    in recursive mode, or the rule table's fields.
//! 2. `excludes` is removed.
//! 3. Names listed in `order` move to the front in that order; the rest keep
//!    their relative order.
//!
//! ## Per field
//!
//! - No rule, recursive: check `target[name]` with the same options and
//!   record a non-empty result as a nested map.
//! - No rule, not recursive: skip.
//! - Rule whose capability marker is unset: warn and skip.
//! - Otherwise apply the suppression options, run the validator, and record
//!   a failing outcome.
//!
//! `abort_when_fail` stops after the first recorded entry.
//!
//! Recursion depth equals the depth of the value tree. Values own their
//! children, so a tree cannot contain a cycle.

use proprule_core::{is_valid_validator, Value};

use crate::failure::{Failure, FailureMap};
use crate::options::CheckOptions;
use crate::registry::{RuleRegistry, RuleTable};

/// Runs checks against the rules of one registry.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> Checker<'r> {
    /// Create a checker reading from `registry`.
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Check `target`, returning `None` when nothing failed.
    pub fn check(&self, target: &Value, options: &CheckOptions) -> Option<FailureMap> {
        let table = self.registry.lookup(target);
        if table.is_none() && !options.recursive {
            return None;
        }
        let table = table.as_deref();

        let mut failures = FailureMap::new();
        for name in Self::resolve_fields(target, table, options) {
            let recorded = match table.and_then(|t| t.get(&name)) {
                None if options.recursive => {
                    let member = target.field(&name).unwrap_or(&Value::Undefined);
                    self.check(member, options).map(Failure::Nested)
                }
                None => None,
                Some(rule) if !is_valid_validator(rule) => {
                    tracing::warn!(
                        field = %name,
                        rule = ?rule,
                        "registered rule is not a valid validator; skipping field"
                    );
                    None
                }
                Some(rule) => {
                    let value = target.field(&name);
                    let suppressed = (options.ignore_not_has_val && value.is_none())
                        || (options.ignore_val_is_undefined
                            && value.map_or(true, Value::is_undefined));
                    if suppressed {
                        None
                    } else {
                        let outcome = rule.check(value.unwrap_or(&Value::Undefined));
                        match (outcome.is_ok(), options.return_raw_result) {
                            (true, _) => None,
                            (false, true) => Some(Failure::Raw(outcome)),
                            (false, false) => Some(Failure::Message(outcome.to_string())),
                        }
                    }
                }
            };

            if let Some(failure) = recorded {
                failures.insert(name.clone(), failure);
                if options.abort_when_fail {
                    tracing::debug!(field = %name, "aborting check after first failure");
                    break;
                }
            }
        }

        failures.into_option()
    }

    /// The ordered list of field names a check of `target` examines.
    pub fn resolve_fields(
        target: &Value,
        table: Option<&RuleTable>,
        options: &CheckOptions,
    ) -> Vec<String> {
        let mut names: Vec<String> = if !options.includes.is_empty() {
            options.includes.clone()
        } else if options.recursive {
            target.keys()
        } else {
            table
                .map(|t| t.fields().map(str::to_string).collect())
                .unwrap_or_default()
        };

        if !options.excludes.is_empty() {
            names.retain(|name| !options.excludes.contains(name));
        }

        if let Some(order) = options.order.as_deref().filter(|o| !o.is_empty()) {
            // sort_by_key is stable: unlisted names keep their relative order.
            names.sort_by_key(|name| {
                order
                    .iter()
                    .position(|o| o == name)
                    .unwrap_or(usize::MAX)
            });
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proprule_core::{validators as v, Object, Outcome, TypeKey, Validate};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn person_registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        let person = TypeKey::new("Person");
        registry.register(&person, "name", v::string()).unwrap();
        registry.register(&person, "age", v::number()).unwrap();
        registry.register(&person, "gender", v::one_of(["M", "F"])).unwrap();
        registry
    }

    fn person(name: impl Into<Value>, age: impl Into<Value>, gender: impl Into<Value>) -> Value {
        Value::from(
            Object::of("Person")
                .with("name", name)
                .with("age", age)
                .with("gender", gender),
        )
    }

    fn keys(map: &FailureMap) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn passing_target_yields_none() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        assert!(checker.check(&person("a", 1, "M"), &CheckOptions::default()).is_none());
    }

    #[test]
    fn unregistered_target_yields_none() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let target = Value::from(Object::new().with("name", 1));
        assert!(checker.check(&target, &CheckOptions::default()).is_none());
        assert!(checker.check(&Value::Null, &CheckOptions::default()).is_none());
        assert!(checker
            .check(&Value::Undefined, &CheckOptions::default().with_recursive(true))
            .is_none());
    }

    #[test]
    fn failures_follow_registration_order() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let result = checker
            .check(&person(1, "s123", "X"), &CheckOptions::default())
            .unwrap();
        assert_eq!(keys(&result), vec!["name", "age", "gender"]);
        assert_eq!(
            result.get("age").and_then(Failure::as_message),
            Some("expected type: number, actual type: string.")
        );
    }

    #[test]
    fn excludes_and_includes() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let target = person(1, "s123", "X");

        let opts = CheckOptions::default().with_excludes(["age"]);
        assert_eq!(keys(&checker.check(&target, &opts).unwrap()), vec!["name", "gender"]);

        let opts = CheckOptions::default().with_includes(["gender", "age"]);
        assert_eq!(keys(&checker.check(&target, &opts).unwrap()), vec!["gender", "age"]);

        let opts = CheckOptions::default()
            .with_includes(["gender", "age"])
            .with_excludes(["gender"]);
        assert_eq!(keys(&checker.check(&target, &opts).unwrap()), vec!["age"]);

        let opts = CheckOptions::default().with_includes(Vec::<String>::new());
        assert_eq!(checker.check(&target, &opts).unwrap().len(), 3);
    }

    #[test]
    fn included_unregistered_names_are_skipped_without_recursion() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let opts = CheckOptions::default().with_includes(["nickname", "gender"]);
        let result = checker.check(&person("a", 1, "X"), &opts).unwrap();
        assert_eq!(keys(&result), vec!["gender"]);
    }

    #[test]
    fn order_is_a_partial_projection() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let opts = CheckOptions::default().with_order(["gender"]);
        let result = checker.check(&person(1, "s123", "X"), &opts).unwrap();
        assert_eq!(keys(&result), vec!["gender", "name", "age"]);

        let opts = CheckOptions::default().with_order(["age", "name"]);
        let result = checker.check(&person(1, "s123", "X"), &opts).unwrap();
        assert_eq!(keys(&result), vec!["age", "name", "gender"]);
    }

    #[test]
    fn abort_stops_at_first_failure_in_resolved_order() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let opts = CheckOptions::default()
            .with_abort_when_fail(true)
            .with_order(["gender"]);
        let result = checker.check(&person(1, "s123", "X"), &opts).unwrap();
        assert_eq!(keys(&result), vec!["gender"]);
    }

    #[test]
    fn suppression_options() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let target = Value::from(Object::of("Person").with("age", Value::Undefined));

        assert!(checker.check(&target, &CheckOptions::default()).is_none());

        let opts = CheckOptions::default().with_ignore_val_is_undefined(false);
        let result = checker.check(&target, &opts).unwrap();
        assert_eq!(keys(&result), vec!["age"]);
        assert_eq!(
            result.get("age").and_then(Failure::as_message),
            Some("expected type: number, actual type: undefined.")
        );

        let opts = CheckOptions::default()
            .with_ignore_val_is_undefined(false)
            .with_ignore_not_has_val(false);
        let result = checker.check(&target, &opts).unwrap();
        assert_eq!(keys(&result), vec!["name", "age", "gender"]);

        // an absent field reads as undefined, so either flag suppresses it
        let opts = CheckOptions::default().with_ignore_not_has_val(false);
        assert!(checker.check(&target, &opts).is_none());
    }

    #[test]
    fn raw_results() {
        let registry = person_registry();
        let checker = Checker::new(&registry);
        let opts = CheckOptions::default().with_return_raw_result(true);
        let result = checker.check(&person("a", 1, "X"), &opts).unwrap();
        let raw = result.get("gender").and_then(Failure::as_raw).unwrap();
        assert!(!raw.is_ok());
        assert_eq!(raw.message(), Some("expected: oneOf(['M', 'F']), actual: 'X'."));
        assert_eq!(
            result.stringify().get("gender").and_then(Failure::as_message),
            Some("expected: oneOf(['M', 'F']), actual: 'X'.")
        );
    }

    #[derive(Debug)]
    struct Revocable {
        verifiable: Arc<AtomicBool>,
    }

    impl Validate for Revocable {
        fn check(&self, _value: &Value) -> Outcome {
            Outcome::fail("always fails")
        }

        fn describe(&self) -> String {
            "revocable".into()
        }

        fn is_verifiable(&self) -> bool {
            self.verifiable.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn malformed_entry_is_skipped_not_failed() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut registry = person_registry();
        let rule: proprule_core::Rule = Arc::new(Revocable {
            verifiable: Arc::clone(&flag),
        });
        registry
            .register(&TypeKey::new("Person"), "nickname", rule)
            .unwrap();
        let target = Value::from(
            Object::of("Person")
                .with("nickname", "x")
                .with("gender", "X"),
        );
        let checker = Checker::new(&registry);
        let result = checker.check(&target, &CheckOptions::default()).unwrap();
        assert_eq!(keys(&result), vec!["gender", "nickname"]);

        flag.store(false, Ordering::SeqCst);
        let result = checker.check(&target, &CheckOptions::default()).unwrap();
        assert_eq!(keys(&result), vec!["gender"]);
    }

    #[test]
    fn resolve_fields_without_table() {
        let target = Value::from(Object::new().with("b", 1).with("a", 2));
        let opts = CheckOptions::default().with_recursive(true).with_order(["a"]);
        assert_eq!(Checker::resolve_fields(&target, None, &opts), vec!["a", "b"]);
        assert!(Checker::resolve_fields(&target, None, &CheckOptions::default()).is_empty());
    }
}
