use super::*;
use crate::{
    any, any_of, array, array_of, boolean, class, duck, function, number, object, object_of,
    optional, predicate, string,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vouch_value::{custom, ClassRef, FunctionValue};

fn hello_spec() -> TypeSpec {
    duck([
        ("hello", string()),
        ("info", duck([("age", number()), ("color", string())])),
    ])
}

fn hello_value(info: Value) -> Value {
    Value::record([("hello", Value::string("hi")), ("info", info)])
}

fn identity_if(name: &str, keep: fn(&Value) -> bool) -> FunctionValue {
    FunctionValue::new(name, move |args| {
        let arg = args.first().cloned().unwrap_or(Value::Undefined);
        Ok(if keep(&arg) { arg } else { Value::Null })
    })
}

// Native kinds

#[test]
fn native_kinds() {
    let f = Value::function(FunctionValue::new("f", |_| Ok(Value::Null)));
    assert!(matches(&Value::int(5), &number()));
    assert!(matches(&Value::float(0.5), &number()));
    assert!(matches(&Value::string("5"), &string()));
    assert!(matches(&Value::Bool(false), &boolean()));
    assert!(matches(&f, &function()));
    assert!(matches(&Value::list(vec![]), &array()));
    assert!(matches(&Value::record::<_, String>([]), &object()));

    assert!(!matches(&Value::string("5"), &number()));
    assert!(!matches(&Value::int(1), &boolean()));
    assert!(!matches(&f, &object()));
    assert!(!matches(&Value::list(vec![]), &object()));
}

#[test]
fn null_and_undefined_fail_every_native_kind() {
    for spec in [number(), string(), boolean(), function(), array(), object()] {
        assert!(!matches(&Value::Null, &spec), "null matched {spec}");
        assert!(!matches(&Value::Undefined, &spec), "undefined matched {spec}");
    }
}

#[test]
fn instances_are_not_plain_objects() {
    let point = ClassRef::new("Point");
    let p = point.instantiate([("x", Value::int(1))]);
    assert!(!matches(&p, &object()));
    assert!(!matches(&p, &object_of(number())));
}

// Predicates

#[test]
fn predicate_fixed_point() {
    let even = predicate(identity_if("even", |v| {
        v.as_int().is_some_and(|n| n % 2 == 0)
    }));
    assert!(matches(&Value::int(4), &even));
    assert!(!matches(&Value::int(3), &even));
    assert!(!matches(&Value::string("4"), &even));
}

#[test]
fn predicate_returning_an_equal_copy_is_not_a_fixed_point() {
    let copy = predicate(FunctionValue::new("copy", |args| {
        let items = args.first().and_then(Value::as_list).unwrap_or_default();
        Ok(Value::list(items.to_vec()))
    }));
    let list = Value::list(vec![Value::int(1)]);
    assert!(!matches(&list, &copy));

    let echo = predicate(identity_if("echo", |_| true));
    assert!(matches(&list, &echo));
}

#[test]
fn predicate_that_raises_is_a_non_match() {
    let failing = predicate(FunctionValue::new("failing", |_| Err(custom("nope"))));
    assert!(!matches(&Value::int(1), &failing));
}

// Classes

#[test]
fn class_spec_accepts_subclass_instances() {
    let shape = ClassRef::new("Shape");
    let circle = ClassRef::extending("Circle", &shape);
    let c = circle.instantiate([("r", Value::int(1))]);
    let s = shape.instantiate::<_, String>([]);

    assert!(matches(&c, &class(&shape)));
    assert!(matches(&c, &class(&circle)));
    assert!(!matches(&s, &class(&circle)));
    assert!(!matches(&Value::Null, &class(&shape)));
    assert!(!matches(&Value::record([("r", Value::int(1))]), &class(&circle)));
}

// Duck types

#[test]
fn duck_type_nested_match() {
    let info = Value::record([("age", Value::int(5)), ("color", Value::string("red"))]);
    assert!(matches(&hello_value(info), &hello_spec()));
}

#[test]
fn duck_type_missing_nested_field_fails() {
    let info = Value::record([("age", Value::int(5))]);
    assert!(!matches(&hello_value(info), &hello_spec()));
}

#[test]
fn duck_type_wrong_nested_kind_fails() {
    let info = Value::record([("age", Value::string("5")), ("color", Value::string("red"))]);
    assert!(!matches(&hello_value(info), &hello_spec()));
}

#[test]
fn duck_type_ignores_extra_fields() {
    let info = Value::record([
        ("age", Value::int(5)),
        ("color", Value::string("red")),
        ("weight", Value::float(2.5)),
    ]);
    assert!(matches(&hello_value(info), &hello_spec()));
}

#[test]
fn duck_type_present_undefined_field_fails_non_optional() {
    let spec = duck([("x", number())]);
    assert!(!matches(&Value::record([("x", Value::Undefined)]), &spec));
    assert!(matches(
        &Value::record([("x", Value::Undefined)]),
        &duck([("x", any())])
    ));
}

#[test]
fn duck_type_missing_field_fails_even_when_optional() {
    let spec = duck([("x", optional(number()))]);
    assert!(!matches(&Value::record::<_, String>([]), &spec));
    assert!(matches(&Value::record([("x", Value::int(1))]), &spec));
}

#[test]
fn duck_type_reads_instance_fields() {
    let point = ClassRef::new("Point");
    let p = point.instantiate([("x", Value::int(1)), ("y", Value::int(2))]);
    assert!(matches(&p, &duck([("x", number()), ("y", number())])));
}

#[test]
fn duck_type_rejects_non_composites() {
    let spec = duck::<_, String>([]);
    assert!(matches(&Value::record::<_, String>([]), &spec));
    assert!(!matches(&Value::int(1), &spec));
    assert!(!matches(&Value::Null, &spec));
    assert!(!matches(&Value::list(vec![]), &spec));
}

// Combinators

#[test]
fn any_of_number_or_string() {
    let spec = any_of([number(), string()]);
    assert!(matches(&Value::int(5), &spec));
    assert!(matches(&Value::string("5"), &spec));
    assert!(!matches(&Value::Bool(true), &spec));
}

#[test]
fn any_of_short_circuits_left_to_right() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let counting = predicate(FunctionValue::new("counting", move |args| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(args.first().cloned().unwrap_or(Value::Undefined))
    }));

    assert!(matches(&Value::int(1), &any_of([number(), counting.clone()])));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(matches(&Value::string("a"), &any_of([number(), counting])));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_any_of_matches_nothing() {
    assert!(!matches(&Value::int(1), &any_of(Vec::new())));
}

#[test]
fn object_of_boolean() {
    let spec = object_of(boolean());
    let ok = Value::record([("abc", Value::Bool(true)), ("bcd", Value::Bool(false))]);
    let bad = Value::record([("abc", Value::Bool(true)), ("bcd", Value::Null)]);
    assert!(matches(&ok, &spec));
    assert!(!matches(&bad, &spec));
    assert!(matches(&Value::record::<_, String>([]), &spec));
    assert!(!matches(&Value::list(vec![Value::Bool(true)]), &spec));
    assert!(!matches(&Value::Null, &spec));
}

#[test]
fn array_of_string() {
    let spec = array_of(string());
    assert!(matches(&Value::list(vec![]), &spec));
    assert!(matches(
        &Value::list(vec![Value::string("a"), Value::string("b")]),
        &spec
    ));
    assert!(!matches(&Value::int(5), &spec));
    assert!(!matches(&Value::list(vec![Value::int(5)]), &spec));
    assert!(!matches(&Value::string("ab"), &spec));
}

#[test]
fn nested_combinators() {
    let spec = array_of(object_of(any_of([number(), array_of(string())])));
    let value = Value::list(vec![
        Value::record([("a", Value::int(1))]),
        Value::record([("b", Value::list(vec![Value::string("x")]))]),
    ]);
    assert!(matches(&value, &spec));

    let bad = Value::list(vec![Value::record([("a", Value::Bool(true))])]);
    assert!(!matches(&bad, &spec));
}

#[test]
fn optional_and_any_on_present_values() {
    assert!(matches(&Value::Bool(false), &optional(boolean())));
    assert!(!matches(&Value::int(5), &optional(boolean())));
    assert!(!matches(&Value::Undefined, &optional(boolean())));
    assert!(matches(&Value::Undefined, &any()));
    assert!(matches(&Value::Null, &any()));
}

// Call-site absence

#[test]
fn absent_argument_passes_only_optional() {
    assert!(matches_arg(None, &optional(boolean())));
    assert!(matches_arg(None, &any_of([number(), optional(string())])));
    assert!(!matches_arg(None, &any()));
    assert!(!matches_arg(None, &number()));
    assert!(matches_arg(Some(&Value::Bool(false)), &optional(boolean())));
    assert!(!matches_arg(Some(&Value::int(5)), &optional(boolean())));
}

// Properties

#[test]
fn matching_is_repeatable_and_leaves_inputs_untouched() {
    let spec = hello_spec();
    let value = hello_value(Value::record([
        ("age", Value::int(5)),
        ("color", Value::string("red")),
    ]));
    let spec_before = spec.clone();
    let value_before = value.clone();

    let first = matches(&value, &spec);
    for _ in 0..10 {
        assert_eq!(matches(&value, &spec), first);
    }
    assert_eq!(spec, spec_before);
    assert_eq!(value, value_before);
}

#[test]
fn deeply_nested_value_matches_without_overflow() {
    let mut spec = number();
    let mut value = Value::int(1);
    for _ in 0..20_000 {
        spec = array_of(spec);
        value = Value::list(vec![value]);
    }
    assert!(matches(&value, &spec));
}

#[test]
fn very_deep_value_is_matched_and_released() {
    let mut value = Value::int(1);
    for _ in 0..200_000 {
        value = Value::list(vec![value]);
    }
    assert!(matches(&value, &array()));
    assert!(!matches(&value, &array_of(string())));
    drop(value);
}

#[test]
fn very_deep_spec_is_released() {
    let mut spec = number();
    for depth in 0..200_000 {
        spec = if depth % 2 == 0 {
            optional(spec)
        } else {
            duck([("inner", spec)])
        };
    }
    assert!(!matches(&Value::int(1), &spec));
    drop(spec);
}
