//! Error types for contract-checked calls.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data; `EvalError::message` is its
//! rendered form. Factory functions (`type_mismatch()`, `custom()`) are the
//! public API and fill in both.
//!
//! Callable bodies return `EvalResult`. The contract wrappers never rewrap an
//! error coming out of a body, so a `Custom` error raised inside a validated,
//! memoized function reaches the caller exactly as it was built.

use crate::value::Value;
use std::fmt;

/// Result of calling a `FunctionValue`.
pub type EvalResult = Result<Value, EvalError>;

/// Where a contract violation was detected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MismatchLocation {
    /// A positional argument, with its declared name when known.
    Parameter { index: usize, name: Option<String> },
    /// The value returned by the callable.
    ReturnValue,
}

impl fmt::Display for MismatchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter {
                index,
                name: Some(name),
            } => write!(f, "parameter {index} (`{name}`)"),
            Self::Parameter { index, name: None } => write!(f, "parameter {index}"),
            Self::ReturnValue => write!(f, "return value"),
        }
    }
}

/// A value that failed its declared type spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Name of the checked callable.
    pub function: String,
    pub location: MismatchLocation,
    /// Rendered type spec, e.g. `ArrayOf(string)`.
    pub expected: String,
    /// Observed kind of the offending value, e.g. `number` or a class name.
    /// `missing` when the argument was not supplied.
    pub got: String,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type mismatch in `{}`: {} expected {}, got {}",
            self.function, self.location, self.expected, self.got
        )
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Raised by the call validator.
    TypeMismatch(TypeMismatch),
    /// Raised by a callable body.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch(mismatch) => write!(f, "{mismatch}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error raised by a contract-checked call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// The structured mismatch, if this error came from a contract check.
    pub fn as_type_mismatch(&self) -> Option<&TypeMismatch> {
        match &self.kind {
            EvalErrorKind::TypeMismatch(mismatch) => Some(mismatch),
            EvalErrorKind::Custom { .. } => None,
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.as_type_mismatch().is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

/// A value failed its declared spec.
#[cold]
pub fn type_mismatch(
    function: &str,
    location: MismatchLocation,
    expected: impl fmt::Display,
    got: impl Into<String>,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch(TypeMismatch {
        function: function.to_string(),
        location,
        expected: expected.to_string(),
        got: got.into(),
    }))
}

/// An error raised from inside a callable body.
#[cold]
pub fn custom(message: impl Into<String>) -> EvalError {
    EvalError::new(message)
}

#[cfg(test)]
mod tests;
