//! Property-based tests for matching and memo keys.
//!
//! Generates random value trees and spec trees and verifies:
//! 1. Determinism: `matches` gives the same answer on every call
//! 2. Combinator laws: `Any`, `AnyOf`, `ArrayOf` agree with their members
//! 3. Memo keys: equal argument lists share one cache entry

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use vouch::{
    any as any_spec, any_of, array, array_of, boolean, duck, matches, number, object, object_of,
    optional, string, FunctionValue, Memoizer, TypeSpec, Value,
};

// -- Generation Strategies --

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::int),
        (-1.0e6..1.0e6f64).prop_map(Value::float),
        "[a-z]{0,6}".prop_map(Value::string),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_value().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::btree_map("[a-c]", inner, 0..4).prop_map(Value::map),
        ]
    })
}

fn leaf_spec() -> impl Strategy<Value = TypeSpec> {
    prop_oneof![
        Just(number()),
        Just(string()),
        Just(boolean()),
        Just(array()),
        Just(object()),
        Just(any_spec()),
    ]
}

fn spec_strategy() -> impl Strategy<Value = TypeSpec> {
    leaf_spec().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(any_of),
            inner.clone().prop_map(array_of),
            inner.clone().prop_map(object_of),
            inner.clone().prop_map(optional),
            prop::collection::vec(("[a-c]", inner), 0..3).prop_map(duck),
        ]
    })
}

// -- Matcher Properties --

proptest! {
    #[test]
    fn matching_is_deterministic(value in value_strategy(), spec in spec_strategy()) {
        let first = matches(&value, &spec);
        prop_assert_eq!(matches(&value, &spec), first);
        prop_assert_eq!(matches(&value.clone(), &spec.clone()), first);
    }

    #[test]
    fn any_matches_every_value(value in value_strategy()) {
        prop_assert!(matches(&value, &any_spec()));
    }

    #[test]
    fn any_of_is_disjunction(
        value in value_strategy(),
        members in prop::collection::vec(spec_strategy(), 0..4),
    ) {
        let expected = members.iter().any(|spec| matches(&value, spec));
        prop_assert_eq!(matches(&value, &any_of(members)), expected);
    }

    #[test]
    fn array_of_checks_every_element(
        items in prop::collection::vec(value_strategy(), 0..5),
        spec in spec_strategy(),
    ) {
        let expected = items.iter().all(|item| matches(item, &spec));
        prop_assert_eq!(matches(&Value::list(items), &array_of(spec)), expected);
    }

    #[test]
    fn optional_is_transparent_for_present_values(
        value in value_strategy(),
        spec in spec_strategy(),
    ) {
        prop_assert_eq!(matches(&value, &optional(spec.clone())), matches(&value, &spec));
    }
}

// -- Memo Key Properties --

proptest! {
    #[test]
    fn equal_arguments_hit_the_cache(args in prop::collection::vec(value_strategy(), 0..4)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let memo = Memoizer::new(FunctionValue::new("arity", move |args| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(Value::int(i64::try_from(args.len()).unwrap()))
        }));

        let copy: Vec<Value> = args.clone();
        let first = memo.call(&args);
        let second = memo.call(&copy);
        prop_assert_eq!(first, second);
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        prop_assert_eq!(memo.cache_len(), 1);
    }

    #[test]
    fn distinct_arguments_get_distinct_entries(a in value_strategy(), b in value_strategy()) {
        prop_assume!(a != b);
        let memo = Memoizer::new(FunctionValue::new("first", |args| {
            Ok(args.first().cloned().unwrap_or(Value::Undefined))
        }));

        prop_assert_eq!(memo.call(std::slice::from_ref(&a)), Ok(a.clone()));
        prop_assert_eq!(memo.call(std::slice::from_ref(&b)), Ok(b.clone()));
        prop_assert_eq!(memo.cache_len(), 2);
    }
}
