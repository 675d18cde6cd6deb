//! Runtime values checked by the contract engine.
//!
//! # Heap Enforcement
//!
//! Heap payloads live behind `Heap<T>`, whose constructor is private to this
//! module. Values are built through factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::list(vec![Value::int(1), Value::int(2)]);
//! let rec = Value::record([("age", Value::int(5)), ("color", Value::string("red"))]);
//! ```
//!
//! # Equality
//!
//! There are three notions of sameness, each with one consumer:
//! - `PartialEq`/`Hash`: exact representation (floats by bit pattern, callables
//!   and classes by identity). Memo keys use this.
//! - [`Value::equals`]: structural, with `1` equal to `1.0`.
//! - [`Value::same_value`]: strict identity. Primitives compare by value, heap
//!   payloads by reference. The fixed-point predicate check uses this.
//!
//! All three recurse through [`vouch_stack::with_stack`].

mod composite;
mod heap;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use vouch_stack::with_stack;

pub use composite::{ClassRef, FunctionValue, InstanceValue, NativeFn};
pub use heap::Heap;

/// Runtime value.
///
/// Dropping a value is iterative, so arbitrarily deep lists and records are
/// released without recursing once per level.
#[derive(Clone)]
pub enum Value {
    /// An argument that was supplied, but as "nothing".
    ///
    /// Distinct from an omitted argument: `Undefined` is present.
    Undefined,
    /// Null. Matches no built-in spec.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    /// Ordered, indexable sequence.
    List(Heap<Vec<Value>>),
    /// Generic composite: string keys to values, no class.
    Map(Heap<BTreeMap<String, Value>>),
    /// Object constructed from a class.
    Instance(InstanceValue),
    Function(FunctionValue),
}

/// Runtime kind tag of a value.
///
/// This is the closed set native type specs test against, plus the kinds no
/// native spec accepts (`Undefined`, `Null`, `Instance`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Instance,
    Function,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Instance => "instance",
            ValueKind::Function => "function",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a generic composite from key/value pairs.
    ///
    /// Later duplicates of a key replace earlier ones.
    ///
    /// ```text
    /// let info = Value::record([("age", Value::int(5)), ("color", Value::string("red"))]);
    /// ```
    pub fn record<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Map(Heap::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(func)
    }
}

// Value Methods

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::String,
            Value::List(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Object,
            Value::Instance(_) => ValueKind::Instance,
            Value::Function(_) => ValueKind::Function,
        }
    }

    /// Kind name for error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Observed type for diagnostics.
    ///
    /// Same as [`Value::type_name`] except instances report their class.
    pub fn describe(&self) -> Cow<'static, str> {
        match self {
            Value::Instance(inst) => Cow::Owned(inst.class().name().to_string()),
            _ => Cow::Borrowed(self.type_name()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float; integers convert.
    #[allow(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 lose precision, matching a float-only number model"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&InstanceValue> {
        match self {
            Value::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Field lookup on anything that has named fields (records and instances).
    ///
    /// `None` means the key is absent; a present key holding `Undefined`
    /// returns `Some(&Value::Undefined)`.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(name),
            Value::Instance(inst) => inst.get_field(name),
            _ => None,
        }
    }

    /// Check structural equality with another value.
    ///
    /// Numbers compare by numeric value across `Int`/`Float`. Callables and
    /// classes compare by identity.
    pub fn equals(&self, other: &Value) -> bool {
        with_stack(|| match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float() == other.as_float()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Map(a), Value::Map(b)) => fields_equal(a, b),
            (Value::Instance(a), Value::Instance(b)) => {
                a.class() == b.class() && fields_equal(a.fields(), b.fields())
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        })
    }

    /// Strict identity.
    ///
    /// Primitives (including strings) compare by value; `NaN` is never the
    /// same value as anything. Lists, records, instances and callables must be
    /// the very same allocation.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float() == other.as_float()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Heap::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Heap::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

fn fields_equal(a: &BTreeMap<String, Value>, b: &BTreeMap<String, Value>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va.equals(vb))
}

// Trait Implementations

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_stack(|| match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{:?}", &***s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => write_fields(f, map),
            Value::Instance(inst) => {
                write!(f, "{} ", inst.class().name())?;
                write_fields(f, inst.fields())
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        })
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_stack(|| match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Instance(inst) => f.debug_tuple("Instance").field(inst).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(func).finish(),
        })
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        // Each popped value has its children moved out before it drops, so
        // its own `drop` finds nothing left to release.
        while let Some(mut value) = pending.pop() {
            detach_children(&mut value, &mut pending);
        }
    }
}

/// Move the children of a uniquely owned payload onto `pending`.
///
/// Shared payloads are left alone; the last handle to go releases them.
fn detach_children(value: &mut Value, pending: &mut Vec<Value>) {
    match value {
        Value::List(items) => {
            if let Some(items) = Heap::get_mut(items) {
                pending.append(items);
            }
        }
        Value::Map(map) => {
            if let Some(map) = Heap::get_mut(map) {
                pending.extend(std::mem::take(map).into_values());
            }
        }
        Value::Instance(inst) => {
            if let Some(fields) = inst.fields_mut() {
                pending.extend(std::mem::take(fields).into_values());
            }
        }
        _ => {}
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &BTreeMap<String, Value>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{k}: {v}")?;
    }
    write!(f, "}}")
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        with_stack(|| match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // Bit pattern keeps Eq reflexive and consistent with Hash.
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        })
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        with_stack(|| match self {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) => items.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Instance(inst) => inst.hash(state),
            Value::Function(func) => func.hash(state),
        });
    }
}
