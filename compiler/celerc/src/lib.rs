//! Celer driver library.
//!
//! Glues the front end and the evaluator into the commands behind the
//! `celer` binary:
//!
//! ```text
//! source text ──► celer_parse::parse ──► Program ──► celer_eval::eval_program
//!                        │
//!                        └──► diagnostics (stderr)
//! ```
//!
//! The library half exists so the commands can be driven from tests with
//! in-memory readers and writers.

pub mod ast_dump;
pub mod commands;
pub mod tracing_setup;

pub use ast_dump::{dump_expr, dump_program};
pub use commands::{CliError, Source};
