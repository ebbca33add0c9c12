//! Expression evaluation.

use celer_ir::{AssignOp, Expr, ExprKind};
use celer_lexer::unescape_string_literal;
use celer_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Interpreter;
use crate::environment::Mutability;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::Value;

impl Interpreter<'_> {
    /// Evaluate an expression to an owned value.
    ///
    /// Operands are evaluated left to right, both sides of every binary
    /// operator included (`&&` and `||` do not short-circuit).
    pub fn eval_expr(&mut self, expr: &Expr) -> Value {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Value {
        match &expr.kind {
            ExprKind::Ident(name) => self.env.lookup(name).unwrap_or_default(),
            ExprKind::Int(n) => Value::Int(*n),
            ExprKind::Float(f) => Value::Float(*f),
            ExprKind::Bool(b) => Value::Bool(*b),
            ExprKind::Str(raw) => Value::Str(unescape_string_literal(raw)),
            ExprKind::Grouping(inner) => self.eval_expr(inner),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand);
                evaluate_unary(*op, &value)
            }
            ExprKind::Binary { left, op, right } => {
                let lhs = self.eval_expr(left);
                let rhs = self.eval_expr(right);
                evaluate_binary(&lhs, *op, &rhs)
            }
            ExprKind::Assign { target, op, value } => {
                let value = self.eval_expr(value);
                self.eval_assign(target, *op, value)
            }
            ExprKind::Ternary {
                cond,
                when_true,
                when_false,
            } => {
                if self.eval_expr(cond).is_truthy() {
                    self.eval_expr(when_true)
                } else {
                    self.eval_expr(when_false)
                }
            }
            ExprKind::Call { callee, args } => {
                let args: Vec<Value> = args.iter().map(|arg| self.eval_expr(arg)).collect();
                match callee.as_ident() {
                    Some(name) => self.call_by_name(name, args),
                    None => Value::Void,
                }
            }
        }
    }

    /// Plain `=` stores into the nearest binding, or defines a new mutable
    /// binding in the current scope when none can take the value (missing,
    /// or constant). Compound forms need an existing binding and yield
    /// `Void` without defining anything when there is none.
    fn eval_assign(&mut self, target: &str, op: AssignOp, value: Value) -> Value {
        let Some(bin_op) = op.binary_op() else {
            if let Err(err) = self.env.assign(target, value.clone()) {
                trace!(name = target, ?err, "assignment defines new binding");
                self.env.define(target, value.clone(), Mutability::Mutable);
            }
            return value;
        };

        let Some(current) = self.env.lookup(target) else {
            return Value::Void;
        };
        let result = evaluate_binary(&current, bin_op, &value);
        if let Err(err) = self.env.assign(target, result.clone()) {
            trace!(name = target, ?err, "compound assignment refused");
        }
        result
    }

    /// Resolve a callee name: builtins first, then user functions. An
    /// unknown name yields `Void`.
    fn call_by_name(&mut self, name: &str, args: Vec<Value>) -> Value {
        if let Some(builtin) = self.env.builtins().get(name) {
            return builtin(&args, self.print_handler());
        }
        match self.env.lookup_function(name) {
            Some(func) => self.call_function(&func, args),
            None => {
                trace!(name, "call to unknown function");
                Value::Void
            }
        }
    }
}
