//! Argument-keyed memoization.
//!
//! The cache is shared by every clone of a [`Memoizer`], so a recursive body
//! that calls back through its own memoized handle hits the same entries.
//! The lock is released before the body runs; a reentrant call never waits on
//! its caller. Two threads missing on the same key may both compute it, and
//! the later store wins.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use vouch_value::{EvalResult, FunctionValue, Value};

use crate::config::MemoPolicy;

/// Cache key: the full ordered argument list.
///
/// Equality is representation-exact (`Value`'s `Eq`), so `1` and `1.0` are
/// different keys and two maps with the same entries are the same key.
///
/// Implements `Borrow<[Value]>` so lookups take the argument slice directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoKey(pub Vec<Value>);

impl Hash for MemoKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `[Value]`'s hash for the `Borrow` lookup.
        self.0.as_slice().hash(state);
    }
}

impl Borrow<[Value]> for MemoKey {
    fn borrow(&self) -> &[Value] {
        &self.0
    }
}

impl From<&[Value]> for MemoKey {
    fn from(args: &[Value]) -> Self {
        MemoKey(args.to_vec())
    }
}

#[derive(Default)]
struct MemoCache {
    entries: FxHashMap<MemoKey, Value>,
    /// Insertion order, oldest first. Only maintained when bounded.
    order: VecDeque<MemoKey>,
}

/// A callable with a result cache keyed by its arguments.
#[derive(Clone)]
pub struct Memoizer {
    func: FunctionValue,
    policy: MemoPolicy,
    cache: Arc<Mutex<MemoCache>>,
}

impl Memoizer {
    /// Memoize with an unbounded cache.
    pub fn new(func: FunctionValue) -> Self {
        Self::with_policy(func, MemoPolicy::default())
    }

    pub fn with_policy(func: FunctionValue, policy: MemoPolicy) -> Self {
        Memoizer {
            func,
            policy,
            cache: Arc::new(Mutex::new(MemoCache::default())),
        }
    }

    /// The wrapped callable.
    pub fn function(&self) -> &FunctionValue {
        &self.func
    }

    pub fn policy(&self) -> MemoPolicy {
        self.policy
    }

    /// Cached result for `args`, if any.
    pub fn get_cached(&self, args: &[Value]) -> Option<Value> {
        self.cache.lock().entries.get(args).cloned()
    }

    /// Record a result, evicting the oldest entries if the policy is bounded
    /// and the cache is full.
    pub fn store(&self, args: &[Value], result: Value) {
        let mut cache = self.cache.lock();

        if let Some(existing) = cache.entries.get_mut(args) {
            *existing = result;
            return;
        }

        if let Some(capacity) = self.policy.capacity() {
            while cache.entries.len() >= capacity {
                let Some(oldest) = cache.order.pop_front() else {
                    cache.entries.clear();
                    break;
                };
                cache.entries.remove(&oldest);
                tracing::debug!(function = self.func.name(), "memo cache evicted oldest entry");
            }
            cache.order.push_back(MemoKey::from(args));
        }
        cache.entries.insert(MemoKey::from(args), result);
    }

    /// Return the cached result for `args`, or call through and cache it.
    ///
    /// Errors are returned without being cached, so a later call with the
    /// same arguments runs the body again.
    #[tracing::instrument(level = "debug", skip_all, fields(function = self.func.name()))]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        if let Some(hit) = self.get_cached(args) {
            tracing::debug!("memo hit");
            return Ok(hit);
        }

        tracing::debug!("memo miss");
        let result = self.func.call(args)?;
        self.store(args, result.clone());
        Ok(result)
    }

    /// Number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.entries.clear();
        cache.order.clear();
    }

    /// Expose the memoized call as a plain callable with the same name and
    /// parameter names.
    pub fn into_function(self) -> FunctionValue {
        let name = self.func.name().to_string();
        let params = self.func.params().to_vec();
        FunctionValue::new(name, move |args| self.call(args)).with_params(params)
    }
}

impl fmt::Debug for Memoizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoizer")
            .field("func", &self.func)
            .field("policy", &self.policy)
            .field("cache_entries", &self.cache_len())
            .finish()
    }
}

/// Wrap `callable` with an unbounded result cache.
pub fn wrap_with_memo(callable: FunctionValue) -> FunctionValue {
    Memoizer::new(callable).into_function()
}
