//! Statement evaluation: blocks, conditionals, loops and jumps.

use celer_ir::{Block, Expr, Stmt, StmtKind};
use celer_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::signal::Signal;

impl Interpreter<'_> {
    /// Evaluate one statement and report how it finished.
    pub fn eval_stmt(&mut self, stmt: &Stmt) -> Signal {
        ensure_sufficient_stack(|| self.eval_stmt_inner(stmt))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt) -> Signal {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr);
                Signal::None
            }
            StmtKind::Return(value) => Signal::Return(
                value
                    .as_ref()
                    .map(|expr| self.eval_expr(expr))
                    .unwrap_or_default(),
            ),
            StmtKind::Break => Signal::Break,
            StmtKind::Continue => Signal::Continue,
            StmtKind::Block(block) => self.eval_block(block),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.eval_if(cond, then_branch, else_branch.as_ref()),
            StmtKind::ForWhile { cond, body } => self.eval_for_while(cond, body),
            StmtKind::ForC {
                init,
                cond,
                post,
                body,
            } => self.eval_for_c(init.as_deref(), cond.as_ref(), post.as_ref(), body),
        }
    }

    /// Run a block in its own scope, stopping at the first statement that
    /// does not finish normally.
    pub fn eval_block(&mut self, block: &Block) -> Signal {
        self.with_env_scope(|scoped| {
            for stmt in &block.stmts {
                let signal = scoped.eval_stmt(stmt);
                if !signal.is_none() {
                    return signal;
                }
            }
            Signal::None
        })
    }

    fn eval_if(&mut self, cond: &Expr, then_branch: &Block, else_branch: Option<&Block>) -> Signal {
        if self.eval_expr(cond).is_truthy() {
            self.eval_block(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.eval_block(else_branch)
        } else {
            Signal::None
        }
    }

    /// `for (cond) { body }`
    fn eval_for_while(&mut self, cond: &Expr, body: &Block) -> Signal {
        while self.eval_expr(cond).is_truthy() {
            match self.eval_block(body) {
                Signal::Break => break,
                signal @ (Signal::Return(_) | Signal::RuntimeError) => return signal,
                Signal::None | Signal::Continue => {}
            }
        }
        Signal::None
    }

    /// `for (init; cond; post) { body }`
    ///
    /// The initializer runs in the enclosing scope, so a loop variable
    /// introduced there outlives the loop.
    fn eval_for_c(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Expr>,
        body: &Block,
    ) -> Signal {
        if let Some(init) = init {
            let signal = self.eval_stmt(init);
            if !signal.is_none() {
                return signal;
            }
        }
        loop {
            if let Some(cond) = cond {
                if !self.eval_expr(cond).is_truthy() {
                    break;
                }
            }
            match self.eval_block(body) {
                Signal::Break => break,
                signal @ (Signal::Return(_) | Signal::RuntimeError) => return signal,
                Signal::None | Signal::Continue => {}
            }
            if let Some(post) = post {
                self.eval_expr(post);
            }
        }
        Signal::None
    }
}
