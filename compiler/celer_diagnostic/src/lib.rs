//! Diagnostic system for Celer error reporting.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A message (what went wrong)
//! - A labeled span (where it went wrong)
//!
//! Only the lexer and parser produce diagnostics. Runtime faults in the
//! evaluator degrade to `void` and never reach this crate.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
