//! Stack growth guard for deep recursion.
//!
//! The Nimini parser and evaluator are both recursive over the syntax
//! tree, and user procs recurse through the evaluator. A script with
//! deeply nested expressions or deep (but legal) recursion must not crash
//! the host application with a native stack overflow, so every recursive
//! entry point runs through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`. On
//! `wasm32` the closure is called directly.

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the
/// red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` has no stack probing; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
