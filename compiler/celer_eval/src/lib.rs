//! Celer Eval - tree-walking evaluator for Celer programs.
//!
//! # Architecture
//!
//! - [`Value`]: dynamically typed runtime values, copied on every read
//! - [`evaluate_binary`] / [`evaluate_unary`]: enum-dispatched operators
//!   where ill-typed operands yield `Value::Void`
//! - [`Environment`]: scope stack of variable bindings and function
//!   handles, plus the environment's [`BuiltinRegistry`]
//! - [`Signal`]: how a statement finished (`return`, `break`, ...)
//! - [`Interpreter`]: evaluates declarations, statements and expressions
//!
//! # Entry point
//!
//! [`eval_program`] runs a parsed program against an environment. Reusing
//! one environment across calls accumulates globals and functions, which
//! is how the REPL keeps state between chunks.

mod builtins;
mod environment;
pub mod interpreter;
mod operators;
mod print_handler;
mod signal;
mod value;

pub use builtins::{print, BuiltinFn, BuiltinRegistry};
pub use environment::{AssignError, Environment, LocalScope, Mutability, Scope};
pub use interpreter::{Interpreter, ScopedInterpreter, ENTRY_POINT};
pub use operators::{evaluate_binary, evaluate_unary, values_equal};
pub use print_handler::{buffer_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler};
pub use signal::{Outcome, Signal};
pub use value::{format_general, Value, FLOAT_EPSILON};

use celer_ir::Program;

/// Evaluate `program` against `env`, printing to stdout.
///
/// Registers the builtins, defines the program's globals and functions in
/// the global scope, then invokes its zero-parameter `main` if it has one.
/// The outcome carries `main`'s return value (`Void` without a `main`);
/// callers that only run the program for its output may discard it.
pub fn eval_program(program: &Program, env: &mut Environment) -> Outcome {
    Interpreter::new(env).eval_program(program)
}

/// Like [`eval_program`], with `print` output sent to `handler`.
pub fn eval_program_with(
    program: &Program,
    env: &mut Environment,
    handler: SharedPrintHandler,
) -> Outcome {
    Interpreter::new(env)
        .with_print_handler(handler)
        .eval_program(program)
}
