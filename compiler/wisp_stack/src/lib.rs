//! Stack safety for the recursive phases of Wisp.
//!
//! The parser and the tree-walking evaluator both recurse once per nested
//! syntax node, and evaluated programs may recurse through user functions.
//! Every such recursion point goes through [`ensure_sufficient_stack`], which
//! grows the native stack on demand instead of letting the host overflow.
//!
//! On `wasm32` this is a plain passthrough.

/// Remaining stack below which we grow (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, when the platform can report it.
///
/// Used by tracing output around deep call chains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
