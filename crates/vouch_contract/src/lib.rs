//! Vouch Contract - call validation and memoization.
//!
//! Wrappers take a `FunctionValue` and return a `FunctionValue`, so they nest:
//!
//! ```text
//! let signature: Signature = [
//!     build_param_spec(0, duck([("x", number()), ("y", number())])),
//!     build_return_spec(number()),
//! ]
//! .into_iter()
//! .collect();
//! let distance = wrap_with_validation(wrap_with_memo(raw_distance), signature);
//! ```
//!
//! With validation outermost, parameter and return checks run on every call,
//! including memo hits. [`ContractBuilder`] produces that composition.
//!
//! # Policies
//!
//! - [`ValidationMode`]: enforce, warn, or skip checks (`VOUCH_CHECKS`).
//! - [`MemoPolicy`]: unbounded (default) or FIFO-bounded cache.

mod builder;
mod config;
mod memo;
mod signature;
mod validator;

pub use builder::ContractBuilder;
pub use config::{MemoPolicy, ParseModeError, ValidationMode};
pub use memo::{wrap_with_memo, MemoKey, Memoizer};
pub use signature::{build_param_spec, build_return_spec, Signature, SignatureContribution};
pub use validator::{wrap_with_validation, ValidatedFunction};
