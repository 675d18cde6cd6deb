//! Vouch - runtime type contracts for dynamically-typed callables.
//!
//! Describe the values a callable accepts and returns with [`TypeSpec`] trees,
//! then wrap the callable so every call is checked against them. Results can
//! be cached per argument list with [`wrap_with_memo`].
//!
//! ```text
//! let point = ClassRef::new("Point");
//! let point_like = duck([("x", number()), ("y", number())]);
//!
//! let distance_to = ContractBuilder::new(raw_distance_to)
//!     .param(0, point_like)
//!     .returns(number())
//!     .memoize()
//!     .build();
//!
//! distance_to.call(&[point.instantiate([("x", Value::int(3)), ("y", Value::int(4))])])?;
//! ```
//!
//! # Crates
//!
//! - `vouch_value`: the runtime value model and errors.
//! - `vouch_spec`: spec trees, combinators, and the matcher.
//! - `vouch_contract`: signatures, the call validator, and the memoizer.

use std::sync::Once;

pub use vouch_contract::{
    build_param_spec, build_return_spec, wrap_with_memo, wrap_with_validation, ContractBuilder,
    MemoKey, MemoPolicy, Memoizer, ParseModeError, Signature, SignatureContribution,
    ValidatedFunction, ValidationMode,
};
pub use vouch_spec::{
    any, any_of, array, array_of, boolean, class, duck, function, matches, matches_arg, number,
    object, object_of, optional, predicate, string, NativeKind, TypeSpec,
};
pub use vouch_value::{
    custom, type_mismatch, ClassRef, EvalError, EvalErrorKind, EvalResult, FunctionValue,
    InstanceValue, MismatchLocation, TypeMismatch, Value, ValueKind,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once, and
/// leaves an already installed global subscriber in place.
///
/// ```bash
/// RUST_LOG=vouch_contract=debug cargo test
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                // The host's subscriber stays in charge.
                tracing::debug!(%err, "global subscriber already set, keeping it");
            }
        }
    });
}
