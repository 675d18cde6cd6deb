//! Stack growth guard for recursive walks over value and spec trees.
//!
//! Both the matcher and the value equality/hash routines recurse once per
//! nesting level. A caller can hand us a list nested 100k levels deep, so
//! every recursive step goes through [`with_stack`].
//!
//! On native targets the `stacker` crate grows the stack on demand. On
//! `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn depth(v: &Value) -> usize {
///     with_stack(|| match v {
///         Value::List(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
///         _ => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
