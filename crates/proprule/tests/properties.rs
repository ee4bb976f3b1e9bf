//! Property tests for the checker's ordering, filtering and isolation
//! guarantees, over randomly generated rule tables and targets.

use proprule::{CheckOptions, Checker, RuleRegistry};
use proprule_core::{validators as v, Object, Rule, TypeKey, Value};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    Number,
    Flag,
}

impl Kind {
    fn rule(self) -> Rule {
        match self {
            Kind::Text => v::string(),
            Kind::Number => v::number(),
            Kind::Flag => v::boolean(),
        }
    }
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Text), Just(Kind::Number), Just(Kind::Flag)]
}

/// `None` means the field is absent from the target.
fn field_value() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Undefined)),
        any::<bool>().prop_map(|b| Some(Value::Bool(b))),
        any::<i64>().prop_map(|n| Some(Value::Int(n))),
        "[a-z]{0,6}".prop_map(|s| Some(Value::String(s))),
    ]
}

fn name_subset() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
        .prop_shuffle()
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

#[derive(Debug, Clone)]
struct Case {
    rules: Vec<(String, Kind)>,
    values: Vec<(String, Option<Value>)>,
}

impl Case {
    fn registry(&self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.declare("T", None).unwrap();
        for (name, kind) in &self.rules {
            registry
                .register(&TypeKey::new("T"), name.as_str(), kind.rule())
                .unwrap();
        }
        registry
    }

    fn target(&self) -> Value {
        let mut obj = Object::of("T");
        for (name, value) in &self.values {
            if let Some(value) = value {
                obj.set(name.as_str(), value.clone());
            }
        }
        Value::Object(obj)
    }
}

fn case() -> impl Strategy<Value = Case> {
    (
        name_subset(),
        prop::collection::vec(kind(), NAMES.len()),
        prop::collection::vec(field_value(), NAMES.len()),
    )
        .prop_map(|(ruled, kinds, values)| Case {
            rules: ruled.into_iter().zip(kinds).collect(),
            values: NAMES
                .iter()
                .map(|n| n.to_string())
                .zip(values)
                .collect(),
        })
}

fn options() -> impl Strategy<Value = CheckOptions> {
    (
        name_subset(),
        name_subset(),
        prop::option::of(name_subset()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(includes, excludes, order, ignore_undefined, ignore_absent)| {
            let mut opts = CheckOptions::default()
                .with_includes(includes)
                .with_excludes(excludes)
                .with_ignore_val_is_undefined(ignore_undefined)
                .with_ignore_not_has_val(ignore_absent);
            opts.order = order;
            opts
        })
}

fn keys(result: &Option<proprule::FailureMap>) -> Vec<String> {
    result
        .as_ref()
        .map(|m| m.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

proptest! {
    /// Checking twice yields structurally equal results.
    #[test]
    fn check_is_idempotent(case in case(), opts in options()) {
        let registry = case.registry();
        let target = case.target();
        let checker = Checker::new(&registry);
        prop_assert_eq!(checker.check(&target, &opts), checker.check(&target, &opts));
    }

    /// A returned map is never empty.
    #[test]
    fn result_is_none_or_non_empty(case in case(), opts in options()) {
        let registry = case.registry();
        if let Some(map) = Checker::new(&registry).check(&case.target(), &opts) {
            prop_assert!(!map.is_empty());
        }
    }

    /// Aborting yields a prefix of the full result.
    #[test]
    fn abort_yields_prefix(case in case(), opts in options()) {
        let registry = case.registry();
        let target = case.target();
        let checker = Checker::new(&registry);
        let full = keys(&checker.check(&target, &opts));
        let aborted = keys(&checker.check(&target, &opts.clone().with_abort_when_fail(true)));
        prop_assert!(aborted.len() <= full.len());
        prop_assert!(aborted.len() <= 1);
        prop_assert_eq!(&full[..aborted.len()], &aborted[..]);
    }

    /// Excluded names never appear; non-empty includes bound the keys.
    #[test]
    fn includes_and_excludes_bound_keys(case in case(), opts in options()) {
        let registry = case.registry();
        let result = keys(&Checker::new(&registry).check(&case.target(), &opts));
        for key in &result {
            prop_assert!(!opts.excludes.contains(key));
            if !opts.includes.is_empty() {
                prop_assert!(opts.includes.contains(key));
            }
        }
    }

    /// Ordered names come first, in order; the rest keep their relative order.
    #[test]
    fn order_is_a_projection(case in case(), order in name_subset()) {
        let registry = case.registry();
        let target = case.target();
        let table = registry.lookup(&target);
        let base = Checker::resolve_fields(&target, table.as_deref(), &CheckOptions::default());
        let opts = CheckOptions::default().with_order(order.clone());
        let ordered = Checker::resolve_fields(&target, table.as_deref(), &opts);

        let listed: Vec<&String> = order.iter().filter(|n| base.contains(n)).collect();
        let rest: Vec<&String> = base.iter().filter(|n| !order.contains(n)).collect();
        let expected: Vec<&String> = listed.into_iter().chain(rest).collect();
        prop_assert_eq!(ordered.iter().collect::<Vec<_>>(), expected);
    }

    /// Registering on a subtype never changes the base type's result.
    #[test]
    fn subtype_registration_is_isolated(case in case(), kinds in prop::collection::vec(kind(), NAMES.len())) {
        let mut registry = case.registry();
        let target = case.target();
        let opts = CheckOptions::default();
        let before = Checker::new(&registry).check(&target, &opts);

        registry.declare("U", Some(&TypeKey::new("T"))).unwrap();
        for (name, kind) in NAMES.iter().zip(kinds) {
            registry.register(&TypeKey::new("U"), *name, kind.rule()).unwrap();
        }

        let after = Checker::new(&registry).check(&target, &opts);
        prop_assert_eq!(before, after);
    }

    /// `None` iff no rule-bearing, unsuppressed field fails.
    #[test]
    fn none_iff_every_checked_field_passes(case in case()) {
        let registry = case.registry();
        let target = case.target();
        let result = Checker::new(&registry).check(&target, &CheckOptions::default());
        let any_failure = case.rules.iter().any(|(name, kind)| {
            match target.field(name) {
                None | Some(Value::Undefined) => false,
                Some(value) => !kind.rule().check(value).is_ok(),
            }
        });
        prop_assert_eq!(result.is_some(), any_failure);
    }
}
