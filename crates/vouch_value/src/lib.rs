//! Vouch Value - dynamic runtime values checked by the contract engine.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `Heap`, `FunctionValue`, `ClassRef`, `InstanceValue`)
//! - Value classification (`ValueKind`) used by native type specs and error messages
//! - Call error types (`EvalError`, `EvalResult`, `TypeMismatch`)
//!
//! # Value Types
//!
//! Heap payloads are shared through `Heap<T>`, which only the value module can
//! construct. Everything else builds values with `Value::` factory methods, so a
//! `Value` is always cheap to clone and safe to send across threads.

mod errors;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult, MismatchLocation, TypeMismatch};
pub use value::{ClassRef, FunctionValue, Heap, InstanceValue, NativeFn, Value, ValueKind};

// Re-export error constructors for use by other crates
pub use errors::{custom, type_mismatch};
