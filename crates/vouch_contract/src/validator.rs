//! Call validation around a wrapped callable.
//!
//! Order per call: parameter checks, then the body (exactly once), then return
//! checks. A failed parameter check means the body never runs.

use std::sync::Arc;

use vouch_value::{EvalError, EvalResult, FunctionValue, Value};

use crate::config::ValidationMode;
use crate::signature::Signature;

/// A callable paired with the signature it must honor.
#[derive(Clone, Debug)]
pub struct ValidatedFunction {
    inner: FunctionValue,
    signature: Arc<Signature>,
    mode: ValidationMode,
}

impl ValidatedFunction {
    /// Validate in `Enforce` mode.
    pub fn new(inner: FunctionValue, signature: Signature) -> Self {
        ValidatedFunction {
            inner,
            signature: Arc::new(signature),
            mode: ValidationMode::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Check arguments, invoke the wrapped callable, check its result.
    ///
    /// Errors from the wrapped callable are returned as-is.
    #[tracing::instrument(level = "debug", skip_all, fields(function = self.inner.name()))]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        if self.mode.checks() {
            self.settle(self.signature.check_args(&self.inner, args))?;
        }

        let result = self.inner.call(args)?;

        if self.mode.checks() {
            self.settle(self.signature.check_return(&self.inner, &result))?;
        }
        Ok(result)
    }

    /// Apply the mode to a check outcome.
    fn settle(&self, outcome: Result<(), EvalError>) -> Result<(), EvalError> {
        match outcome {
            Err(err) if !self.mode.raises() => {
                tracing::warn!(%err, "contract violation ignored");
                Ok(())
            }
            other => other,
        }
    }

    /// Expose the validated call as a plain callable with the same name and
    /// parameter names.
    pub fn into_function(self) -> FunctionValue {
        let name = self.inner.name().to_string();
        let params = self.inner.params().to_vec();
        FunctionValue::new(name, move |args| self.call(args)).with_params(params)
    }
}

/// Wrap `callable` so every call is checked against `signature`.
///
/// Uses [`ValidationMode::Enforce`]; see [`ValidatedFunction::with_mode`] for
/// the other modes.
pub fn wrap_with_validation(callable: FunctionValue, signature: Signature) -> FunctionValue {
    ValidatedFunction::new(callable, signature).into_function()
}
