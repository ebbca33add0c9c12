//! Stack growth for deep recursion.
//!
//! Celer parses and evaluates by direct recursion, so recursion depth tracks
//! AST nesting depth (and call depth at run time). Wrapping the recursive
//! entry points in [`ensure_sufficient_stack`] moves execution onto a freshly
//! allocated segment whenever the current one runs low, instead of
//! overflowing the thread stack.
//!
//! On `wasm32` the wrapper is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the remaining stack
/// is inside the red zone.
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr) -> Value {
///     ensure_sufficient_stack(|| self.eval_expr_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack in bytes, if the platform can report it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
