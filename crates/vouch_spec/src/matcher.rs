//! Structural matching of runtime values against type specs.

use std::slice;

use vouch_stack::with_stack;
use vouch_value::Value;

use crate::spec::TypeSpec;

/// Test whether `value` satisfies `spec`.
///
/// Total: every combination of value and spec yields a boolean. A predicate
/// spec whose function raises is treated as a non-match.
///
/// `value` is always present here. `Optional(s)` therefore reduces to `s`, and
/// `Any` always matches; use [`matches_arg`] where the value may be absent.
pub fn matches(value: &Value, spec: &TypeSpec) -> bool {
    with_stack(|| match spec {
        TypeSpec::Native(kind) => kind.admits(value.kind()),
        TypeSpec::Predicate(check) => match check.call(slice::from_ref(value)) {
            Ok(result) => result.same_value(value),
            Err(err) => {
                tracing::trace!(predicate = check.name(), %err, "predicate raised");
                false
            }
        },
        TypeSpec::Class(class) => value
            .as_instance()
            .is_some_and(|inst| inst.is_instance_of(class)),
        TypeSpec::Duck(fields) => match value {
            Value::Map(_) | Value::Instance(_) => fields.iter().all(|(name, field_spec)| {
                value
                    .get_field(name)
                    .is_some_and(|field| matches(field, field_spec))
            }),
            _ => false,
        },
        TypeSpec::AnyOf(members) => members.iter().any(|member| matches(value, member)),
        TypeSpec::ArrayOf(element) => value
            .as_list()
            .is_some_and(|items| items.iter().all(|item| matches(item, element))),
        TypeSpec::ObjectOf(field_spec) => value
            .as_map()
            .is_some_and(|map| map.values().all(|field| matches(field, field_spec))),
        TypeSpec::Optional(inner) => matches(value, inner),
        TypeSpec::Any => true,
    })
}

/// Test a call-site argument, where `None` means "not supplied".
///
/// An omitted argument passes only specs that accept absence (`Optional`,
/// possibly inside an `AnyOf`).
pub fn matches_arg(arg: Option<&Value>, spec: &TypeSpec) -> bool {
    match arg {
        Some(value) => matches(value, spec),
        None => spec.accepts_absent(),
    }
}

#[cfg(test)]
mod tests;
