//! The type spec model.

use std::fmt;
use std::sync::Arc;

use vouch_stack::with_stack;
use vouch_value::{ClassRef, FunctionValue, ValueKind};

/// Native kinds a spec can name directly.
///
/// Null, undefined and class instances have no native kind: no native spec
/// accepts them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Number,
    String,
    Boolean,
    Function,
    Array,
    /// Plain records only; not lists, instances, or null.
    Object,
}

impl NativeKind {
    /// Whether a value of runtime kind `kind` satisfies this native kind.
    #[inline]
    pub fn admits(self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (NativeKind::Number, ValueKind::Number)
                | (NativeKind::String, ValueKind::String)
                | (NativeKind::Boolean, ValueKind::Boolean)
                | (NativeKind::Function, ValueKind::Function)
                | (NativeKind::Array, ValueKind::Array)
                | (NativeKind::Object, ValueKind::Object)
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            NativeKind::Number => "number",
            NativeKind::String => "string",
            NativeKind::Boolean => "boolean",
            NativeKind::Function => "function",
            NativeKind::Array => "array",
            NativeKind::Object => "object",
        }
    }
}

/// An immutable description of an acceptable value shape.
///
/// Cloning is cheap: nested specs sit behind `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSpec {
    /// The value's runtime kind is this native kind.
    Native(NativeKind),
    /// Fixed-point predicate: accepts `v` iff calling the function with `v`
    /// returns `v` itself (by identity).
    Predicate(FunctionValue),
    /// An instance of this class or one of its subclasses.
    Class(ClassRef),
    /// Every listed field is present and matches. Extra fields are ignored.
    Duck(Arc<[(String, TypeSpec)]>),
    /// At least one member matches, tried in order.
    AnyOf(Arc<[TypeSpec]>),
    /// A list whose every element matches.
    ArrayOf(Arc<TypeSpec>),
    /// A plain record whose every field value matches.
    ObjectOf(Arc<TypeSpec>),
    /// Absent, or present and matching.
    Optional(Arc<TypeSpec>),
    /// Any present value.
    Any,
}

impl TypeSpec {
    /// Whether an omitted argument satisfies this spec.
    ///
    /// Only `Optional` does, directly or as a member of an `AnyOf`.
    pub fn accepts_absent(&self) -> bool {
        match self {
            TypeSpec::Optional(_) => true,
            TypeSpec::AnyOf(members) => members.iter().any(TypeSpec::accepts_absent),
            _ => false,
        }
    }
}

impl Drop for TypeSpec {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_nested(self, &mut pending);
        while let Some(mut spec) = pending.pop() {
            detach_nested(&mut spec, &mut pending);
        }
    }
}

/// Move nested specs out of uniquely owned payloads onto `pending`, leaving
/// `Any` in their place.
fn detach_nested(spec: &mut TypeSpec, pending: &mut Vec<TypeSpec>) {
    let take = |slot: &mut TypeSpec| std::mem::replace(slot, TypeSpec::Any);
    match spec {
        TypeSpec::ArrayOf(inner) | TypeSpec::ObjectOf(inner) | TypeSpec::Optional(inner) => {
            if let Some(inner) = Arc::get_mut(inner) {
                pending.push(take(inner));
            }
        }
        TypeSpec::AnyOf(members) => {
            if let Some(members) = Arc::get_mut(members) {
                pending.extend(members.iter_mut().map(take));
            }
        }
        TypeSpec::Duck(fields) => {
            if let Some(fields) = Arc::get_mut(fields) {
                pending.extend(fields.iter_mut().map(|(_, field)| take(field)));
            }
        }
        TypeSpec::Native(_) | TypeSpec::Predicate(_) | TypeSpec::Class(_) | TypeSpec::Any => {}
    }
}

impl From<NativeKind> for TypeSpec {
    fn from(kind: NativeKind) -> Self {
        TypeSpec::Native(kind)
    }
}

impl From<&ClassRef> for TypeSpec {
    fn from(class: &ClassRef) -> Self {
        TypeSpec::Class(class.clone())
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_stack(|| match self {
            TypeSpec::Native(kind) => write!(f, "{kind}"),
            TypeSpec::Predicate(func) => write!(f, "<predicate {}>", func.name()),
            TypeSpec::Class(class) => f.write_str(class.name()),
            TypeSpec::Duck(fields) => {
                write!(f, "{{")?;
                for (i, (name, spec)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {spec}")?;
                }
                write!(f, "}}")
            }
            TypeSpec::AnyOf(members) => {
                write!(f, "AnyOf(")?;
                for (i, spec) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{spec}")?;
                }
                write!(f, ")")
            }
            TypeSpec::ArrayOf(inner) => write!(f, "ArrayOf({inner})"),
            TypeSpec::ObjectOf(inner) => write!(f, "ObjectOf({inner})"),
            TypeSpec::Optional(inner) => write!(f, "Optional({inner})"),
            TypeSpec::Any => write!(f, "Any"),
        })
    }
}
