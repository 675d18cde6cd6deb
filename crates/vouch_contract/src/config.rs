//! Policy types for validation and memoization.
//!
//! Enums with policy methods; callers branch on behavior, not on variants.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// How the call validator reacts to a contract violation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ValidationMode {
    /// Raise a type mismatch error.
    #[default]
    Enforce,
    /// Log the violation at `warn` level and let the call proceed.
    Warn,
    /// Skip matching entirely.
    Off,
}

impl ValidationMode {
    /// Environment variable read by [`ValidationMode::from_env`].
    pub const ENV_VAR: &'static str = "VOUCH_CHECKS";

    /// Read the mode from `VOUCH_CHECKS`.
    ///
    /// Unset or unrecognized values fall back to `Enforce`.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: ParseModeError| {
                tracing::warn!(%err, "falling back to enforce");
                Self::Enforce
            }),
            Err(_) => Self::default(),
        }
    }

    /// Whether specs are evaluated at all.
    #[inline]
    pub fn checks(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Whether a failed check aborts the call.
    #[inline]
    pub fn raises(self) -> bool {
        matches!(self, Self::Enforce)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enforce => "enforce",
            Self::Warn => "warn",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "warn" => Ok(Self::Warn),
            "off" => Ok(Self::Off),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// An unrecognized validation mode string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown validation mode `{}` (expected enforce, warn, or off)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

/// Growth policy for a memo cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MemoPolicy {
    /// Never evict. The cache lives as long as the memoized callable.
    #[default]
    Unbounded,
    /// Keep at most `capacity` entries, evicting the oldest insertion first.
    Bounded { capacity: NonZeroUsize },
}

impl MemoPolicy {
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self::Bounded { capacity }
    }

    /// Maximum number of entries, or `None` if unbounded.
    #[inline]
    pub fn capacity(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded { capacity } => Some(capacity.get()),
        }
    }
}
