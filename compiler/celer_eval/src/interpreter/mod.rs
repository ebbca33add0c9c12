//! Tree-walking interpreter.
//!
//! The interpreter borrows an [`Environment`] for the length of one program
//! evaluation and writes `print` output through a [`SharedPrintHandler`].
//! Expressions evaluate to owned [`Value`]s; statements report a [`Signal`].

mod control;
mod expr;
mod scope_guard;

pub use scope_guard::ScopedInterpreter;

use celer_ir::{Declaration, FunctionRef, Program};
use tracing::{debug, trace};

use crate::environment::{Environment, Mutability};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::signal::{Outcome, Signal};
use crate::Value;

/// Name of the function invoked after a program's declarations load.
pub const ENTRY_POINT: &str = "main";

/// Evaluates Celer programs against a borrowed environment.
pub struct Interpreter<'a> {
    pub(crate) env: &'a mut Environment,
    print_handler: SharedPrintHandler,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter that prints to stdout.
    pub fn new(env: &'a mut Environment) -> Self {
        Interpreter {
            env,
            print_handler: stdout_handler(),
        }
    }

    /// Replace the output sink used by `print`.
    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Load a program's declarations, then run its entry point.
    ///
    /// Globals are defined in declaration order with their declared
    /// constness; a missing initializer binds `Void`. Functions are
    /// registered by handle, so they stay callable after `program` is
    /// dropped. The last zero-parameter `main` declared by *this* program is
    /// invoked; a `main` left over from an earlier program in the same
    /// environment is not re-run.
    ///
    /// `main`'s return value is surfaced as [`Outcome::value`] for embedders
    /// and tests. The language itself never observes it: `celer run` exits 0
    /// whatever `main` returns.
    pub fn eval_program(&mut self, program: &Program) -> Outcome {
        self.env.builtins_mut().register_prelude();

        let mut entry: Option<&FunctionRef> = None;
        for decl in &program.decls {
            match decl {
                Declaration::Variable(var) => {
                    let value = var
                        .init
                        .as_ref()
                        .map_or(Value::Void, |init| self.eval_expr(init));
                    trace!(name = %var.name, is_const = var.is_const, "define global");
                    self.env
                        .define(&var.name, value, Mutability::from_const(var.is_const));
                }
                Declaration::Function(func) => {
                    trace!(name = %func.name, params = func.params.len(), "define function");
                    self.env.define_function(func.clone());
                    if func.name == ENTRY_POINT && func.params.is_empty() {
                        entry = Some(func);
                    }
                }
            }
        }

        let Some(main) = entry else {
            debug!(decls = program.len(), "no entry point");
            return Outcome::normal(Value::Void);
        };
        debug!(line = main.pos.line, "invoking main");
        let value = self.call_function(main, Vec::new());
        Outcome::normal(value)
    }

    /// Call a user function with already evaluated arguments.
    ///
    /// Parameters bind positionally in a fresh scope on top of the current
    /// one; missing arguments bind `Void` and extra arguments are dropped.
    /// A `return` yields its value; any other way out yields `Void`.
    pub fn call_function(&mut self, func: &FunctionRef, args: Vec<Value>) -> Value {
        debug!(name = %func.name, argc = args.len(), depth = self.env.depth(), "call");
        let mut args = args.into_iter();
        self.with_env_scope(|scoped| {
            for param in &func.params {
                let value = args.next().unwrap_or_default();
                scoped.env.define(&param.name, value, Mutability::Mutable);
            }
            match scoped.eval_block(&func.body) {
                Signal::Return(value) => value,
                Signal::None | Signal::Break | Signal::Continue | Signal::RuntimeError => {
                    Value::Void
                }
            }
        })
    }
}

#[cfg(test)]
mod tests;
