//! Stack growth for recursive walks.
//!
//! The grammar generator recurses over nested rule alternatives and first
//! sets, and tree dumps recurse over arbitrarily deep bracket nesting.
//! Wrapping those recursive steps in [`ensure_sufficient_stack`] moves them
//! onto a fresh segment when the current one runs low.
//!
//! On `wasm32` the wrapper is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
