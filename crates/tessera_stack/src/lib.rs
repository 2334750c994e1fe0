//! Stack growth guard for recursive descent over nested patterns.
//!
//! Pattern matching walks a pattern tree and the value it is matched
//! against in lockstep. Patterns are built by callers at runtime, so their
//! depth is not bounded by anything the matcher controls. Every recursive
//! step goes through [`ensure_sufficient_stack`], which grows the stack on
//! demand instead of overflowing.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack.
//! - **WASM targets**: No-op passthrough.
//!
//! # Configuration
//!
//! - **Red zone**: 64KB. Below this much remaining stack, a new segment is
//!   allocated before recursing.
//! - **Growth size**: 1MB per new segment.

/// Minimum stack space to keep available before recursing (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space allocated for each new segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn match_at(pattern: &Pattern, value: &Value, cache: &mut Cache) -> MatchOutcome {
///     ensure_sufficient_stack(|| match pattern {
///         Pattern::Array(array) => match_array(array, value, cache),
///         // ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
