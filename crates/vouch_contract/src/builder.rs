//! Fluent assembly of a contract-checked callable.

use vouch_spec::TypeSpec;
use vouch_value::FunctionValue;

use crate::config::{MemoPolicy, ValidationMode};
use crate::memo::Memoizer;
use crate::signature::{build_param_spec, build_return_spec, Signature, SignatureContribution};
use crate::validator::ValidatedFunction;

/// Collects specs and options for one callable, then wraps it.
///
/// `build` puts validation outside memoization, so parameter and return
/// checks run on cache hits too. The validation mode starts from
/// `VOUCH_CHECKS` (see [`ValidationMode::from_env`]); [`ContractBuilder::mode`]
/// overrides it.
///
/// ```text
/// let distance = ContractBuilder::new(raw_distance)
///     .param(0, duck([("x", number()), ("y", number())]))
///     .returns(number())
///     .memoize()
///     .build();
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct ContractBuilder {
    func: FunctionValue,
    signature: Signature,
    memo: Option<MemoPolicy>,
    mode: ValidationMode,
}

impl ContractBuilder {
    pub fn new(func: FunctionValue) -> Self {
        ContractBuilder {
            func,
            signature: Signature::new(),
            memo: None,
            mode: ValidationMode::from_env(),
        }
    }

    pub fn param(self, position: usize, spec: TypeSpec) -> Self {
        self.contribute(build_param_spec(position, spec))
    }

    pub fn returns(self, spec: TypeSpec) -> Self {
        self.contribute(build_return_spec(spec))
    }

    pub fn contribute(mut self, contribution: SignatureContribution) -> Self {
        self.signature.add(contribution);
        self
    }

    /// Cache results with an unbounded cache.
    pub fn memoize(self) -> Self {
        self.memoize_with(MemoPolicy::Unbounded)
    }

    pub fn memoize_with(mut self, policy: MemoPolicy) -> Self {
        self.memo = Some(policy);
        self
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Produce the wrapped callable.
    ///
    /// Without specs or memoization the original callable comes back as-is.
    pub fn build(self) -> FunctionValue {
        let ContractBuilder {
            func,
            signature,
            memo,
            mode,
        } = self;

        let func = match memo {
            Some(policy) => Memoizer::with_policy(func, policy).into_function(),
            None => func,
        };
        if signature.is_empty() {
            return func;
        }
        ValidatedFunction::new(func, signature)
            .with_mode(mode)
            .into_function()
    }
}
