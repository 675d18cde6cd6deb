//! Spec constructors.
//!
//! Each returns a fresh `TypeSpec` and has no side effects.

use std::sync::Arc;

use vouch_value::{ClassRef, FunctionValue};

use crate::spec::{NativeKind, TypeSpec};

#[inline]
pub fn number() -> TypeSpec {
    TypeSpec::Native(NativeKind::Number)
}

#[inline]
pub fn string() -> TypeSpec {
    TypeSpec::Native(NativeKind::String)
}

#[inline]
pub fn boolean() -> TypeSpec {
    TypeSpec::Native(NativeKind::Boolean)
}

#[inline]
pub fn function() -> TypeSpec {
    TypeSpec::Native(NativeKind::Function)
}

#[inline]
pub fn array() -> TypeSpec {
    TypeSpec::Native(NativeKind::Array)
}

#[inline]
pub fn object() -> TypeSpec {
    TypeSpec::Native(NativeKind::Object)
}

/// Instances of `class`, including subclasses.
pub fn class(class: &ClassRef) -> TypeSpec {
    TypeSpec::Class(class.clone())
}

/// A user-supplied check with the fixed-point convention: `f(v)` must return
/// `v` itself for `v` to match.
///
/// ```text
/// let even = FunctionValue::new("even", |args| {
///     let v = args.first().cloned().unwrap_or(Value::Undefined);
///     Ok(if v.as_int().is_some_and(|n| n % 2 == 0) { v } else { Value::Null })
/// });
/// let spec = predicate(even);
/// ```
pub fn predicate(check: FunctionValue) -> TypeSpec {
    TypeSpec::Predicate(check)
}

/// Structural record spec; fields are checked in the order given.
pub fn duck<I, K>(fields: I) -> TypeSpec
where
    I: IntoIterator<Item = (K, TypeSpec)>,
    K: Into<String>,
{
    TypeSpec::Duck(fields.into_iter().map(|(k, s)| (k.into(), s)).collect())
}

/// Matches if any member matches. With no members it matches nothing.
pub fn any_of<I>(specs: I) -> TypeSpec
where
    I: IntoIterator<Item = TypeSpec>,
{
    TypeSpec::AnyOf(specs.into_iter().collect())
}

pub fn array_of(element: TypeSpec) -> TypeSpec {
    TypeSpec::ArrayOf(Arc::new(element))
}

pub fn object_of(value: TypeSpec) -> TypeSpec {
    TypeSpec::ObjectOf(Arc::new(value))
}

pub fn optional(inner: TypeSpec) -> TypeSpec {
    TypeSpec::Optional(Arc::new(inner))
}

#[inline]
pub fn any() -> TypeSpec {
    TypeSpec::Any
}
