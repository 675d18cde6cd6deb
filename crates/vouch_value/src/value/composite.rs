//! Composite value types: classes, instances, and callables.
//!
//! These carry reference identity. Two `ClassRef`s are the same class only if
//! they share one definition, and two `FunctionValue`s are the same callable
//! only if they share one body.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Heap, Value};
use crate::EvalResult;

// ClassRef

struct ClassDef {
    name: String,
    parent: Option<ClassRef>,
}

/// Shared handle to a class definition.
///
/// Classes form a single-inheritance chain through `parent`. Equality and
/// hashing are by definition identity, never by name: two unrelated classes
/// that are both called `Point` are different classes.
#[derive(Clone)]
pub struct ClassRef(Arc<ClassDef>);

impl ClassRef {
    /// Define a root class.
    pub fn new(name: impl Into<String>) -> Self {
        ClassRef(Arc::new(ClassDef {
            name: name.into(),
            parent: None,
        }))
    }

    /// Define a class that extends `parent`.
    pub fn extending(name: impl Into<String>, parent: &ClassRef) -> Self {
        ClassRef(Arc::new(ClassDef {
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&ClassRef> {
        self.0.parent.as_ref()
    }

    /// Whether `self` is `ancestor` or inherits from it, transitively.
    pub fn is_subclass_of(&self, ancestor: &ClassRef) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Construct an instance of this class with the given fields.
    pub fn instantiate<I, K>(&self, fields: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Instance(InstanceValue {
            class: self.clone(),
            fields: Heap::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        })
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent() {
            Some(parent) => write!(f, "class {} extends {}", self.name(), parent.name()),
            None => write!(f, "class {}", self.name()),
        }
    }
}

// InstanceValue

/// An object constructed from a class.
///
/// Fields are stored by name so duck-typed specs can inspect instances the same
/// way they inspect plain records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceValue {
    class: ClassRef,
    fields: Heap<BTreeMap<String, Value>>,
}

impl InstanceValue {
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Fields, if no other handle shares them.
    pub(super) fn fields_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        Heap::get_mut(&mut self.fields)
    }

    /// Instance-of check along the class chain.
    pub fn is_instance_of(&self, class: &ClassRef) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Reference identity: the same object, not merely an equal one.
    pub fn ptr_eq(&self, other: &InstanceValue) -> bool {
        self.class == other.class && Heap::ptr_eq(&self.fields, &other.fields)
    }
}

// FunctionValue

/// Signature of a callable body.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// A named callable.
///
/// The body receives the arguments exactly as the caller supplied them; a
/// shorter slice than `params` means trailing arguments were omitted.
/// `params` only feeds diagnostics.
#[derive(Clone)]
pub struct FunctionValue {
    name: Arc<str>,
    params: Arc<[String]>,
    body: Arc<NativeFn>,
}

impl FunctionValue {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    {
        let name: String = name.into();
        FunctionValue {
            name: Arc::from(name),
            params: Arc::from(Vec::new()),
            body: Arc::new(body),
        }
    }

    /// Attach parameter names, used when reporting a mismatched argument.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn param_name(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Invoke the body.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.body)(args)
    }

    /// Whether both values share one body.
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.body), Arc::as_ptr(&other.body))
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for FunctionValue {}

impl Hash for FunctionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.body).cast::<()>().hash(state);
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
