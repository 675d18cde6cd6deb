//! Vouch Spec - type specs and the structural matcher.
//!
//! A [`TypeSpec`] describes an accepted value shape. [`matches`] tests a runtime
//! [`Value`](vouch_value::Value) against one; it is total, never raises, and
//! never mutates either side.
//!
//! Specs are built from the constructors in this crate:
//!
//! ```text
//! let point_like = duck([("x", number()), ("y", number())]);
//! let tags = array_of(string());
//! let flags = object_of(boolean());
//! let maybe = optional(any_of([number(), string()]));
//! ```
//!
//! Absence (an argument that was never supplied) is only observable at a call
//! site; [`matches_arg`] takes `Option<&Value>` for that case.

mod combinators;
mod matcher;
mod spec;

pub use combinators::{
    any, any_of, array, array_of, boolean, class, duck, function, number, object, object_of,
    optional, predicate, string,
};
pub use matcher::{matches, matches_arg};
pub use spec::{NativeKind, TypeSpec};
