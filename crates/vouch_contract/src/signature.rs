//! Parameter and return specs bound to one callable.
//!
//! A `Signature` is assembled from independent contributions, one per
//! annotation. Contributions only ever add: a second spec on the same slot is
//! kept alongside the first and both must hold, so the order annotations are
//! applied in never changes the result.

use std::collections::BTreeMap;

use vouch_spec::{matches_arg, TypeSpec};
use vouch_value::{type_mismatch, EvalError, FunctionValue, MismatchLocation, Value};

/// One annotation's worth of signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureContribution {
    Param { position: usize, spec: TypeSpec },
    Return { spec: TypeSpec },
}

/// Spec for the argument at `position` (zero-based).
pub fn build_param_spec(position: usize, spec: TypeSpec) -> SignatureContribution {
    SignatureContribution::Param { position, spec }
}

/// Spec for the return value.
pub fn build_return_spec(spec: TypeSpec) -> SignatureContribution {
    SignatureContribution::Return { spec }
}

/// Positional parameter specs plus return specs.
///
/// A slot with no specs is unconstrained. Arguments beyond the last declared
/// slot are never checked. Slots are stored sparsely, so a large position
/// costs one entry, not a slot per preceding position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    params: BTreeMap<usize, Vec<TypeSpec>>,
    returns: Vec<TypeSpec>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contribution in.
    pub fn add(&mut self, contribution: SignatureContribution) {
        match contribution {
            SignatureContribution::Param { position, spec } => {
                self.params.entry(position).or_default().push(spec);
            }
            SignatureContribution::Return { spec } => self.returns.push(spec),
        }
    }

    #[must_use]
    pub fn with(mut self, contribution: SignatureContribution) -> Self {
        self.add(contribution);
        self
    }

    /// Specs declared for the parameter at `position`.
    pub fn param_specs(&self, position: usize) -> &[TypeSpec] {
        self.params
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn return_specs(&self) -> &[TypeSpec] {
        &self.returns
    }

    /// One past the highest declared parameter position, saturating at
    /// `usize::MAX`.
    pub fn declared_params(&self) -> usize {
        self.params
            .last_key_value()
            .map_or(0, |(&position, _)| position.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.returns.is_empty()
    }

    /// Check every declared parameter slot against `args`.
    ///
    /// Slots are checked in position order and the first failure is returned.
    /// A slot past the end of `args` is an omitted argument.
    pub fn check_args(&self, func: &FunctionValue, args: &[Value]) -> Result<(), EvalError> {
        for (&index, specs) in &self.params {
            let arg = args.get(index);
            if let Some(spec) = specs.iter().find(|spec| !matches_arg(arg, spec)) {
                return Err(type_mismatch(
                    func.name(),
                    MismatchLocation::Parameter {
                        index,
                        name: func.param_name(index).map(str::to_string),
                    },
                    spec,
                    arg.map_or_else(|| "missing".into(), |value| value.describe().into_owned()),
                ));
            }
        }
        Ok(())
    }

    /// Check a returned value against every return spec.
    pub fn check_return(&self, func: &FunctionValue, result: &Value) -> Result<(), EvalError> {
        match self
            .returns
            .iter()
            .find(|spec| !matches_arg(Some(result), spec))
        {
            Some(spec) => Err(type_mismatch(
                func.name(),
                MismatchLocation::ReturnValue,
                spec,
                result.describe(),
            )),
            None => Ok(()),
        }
    }
}

impl Extend<SignatureContribution> for Signature {
    fn extend<I: IntoIterator<Item = SignatureContribution>>(&mut self, iter: I) {
        for contribution in iter {
            self.add(contribution);
        }
    }
}

impl FromIterator<SignatureContribution> for Signature {
    fn from_iter<I: IntoIterator<Item = SignatureContribution>>(iter: I) -> Self {
        let mut signature = Signature::new();
        signature.extend(iter);
        signature
    }
}
