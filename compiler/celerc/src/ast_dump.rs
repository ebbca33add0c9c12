//! Indented tree rendering of a parsed program, used by `celer parse`.
//!
//! Each node prints on its own line; children sit two spaces deeper than
//! their parent, and labelled children (`cond:`, `body:`, ...) one more
//! level below their label. Absent optional nodes print `(none)`.

use std::fmt::{self, Write};

use celer_eval::format_general;
use celer_ir::{Block, Declaration, Expr, ExprKind, FunctionDecl, Program, Stmt, StmtKind, VarDecl};

const STEP: usize = 2;

/// Render `program` as an indented tree.
pub fn dump_program(program: &Program) -> String {
    let mut printer = AstPrinter::default();
    printer.line(0, "Program");
    for decl in &program.decls {
        match decl {
            Declaration::Variable(var) => printer.var_decl(var, 1),
            Declaration::Function(func) => printer.func_decl(func, 1),
        }
    }
    printer.out
}

/// Render a single expression subtree starting at column zero.
pub fn dump_expr(expr: &Expr) -> String {
    let mut printer = AstPrinter::default();
    printer.expr(expr, 0);
    printer.out
}

#[derive(Default)]
struct AstPrinter {
    out: String,
}

impl AstPrinter {
    fn line(&mut self, indent: usize, text: impl fmt::Display) {
        let _ = writeln!(self.out, "{:indent$}{text}", "");
    }

    fn var_decl(&mut self, var: &VarDecl, indent: usize) {
        let keyword = if var.is_const { "const" } else { "variable" };
        self.line(indent, format_args!("VarDecl {keyword} {}", var.name));
        self.line(indent + 1, format_args!("type: {}", var.ty));
        self.line(indent + 1, "init:");
        self.opt_expr(var.init.as_ref(), indent + 1 + STEP);
    }

    fn func_decl(&mut self, func: &FunctionDecl, indent: usize) {
        self.line(
            indent,
            format_args!("FuncDecl {} -> {}", func.name, func.return_type),
        );
        self.line(indent + 1, "params:");
        for param in &func.params {
            self.line(
                indent + 1 + STEP,
                format_args!("- {} : {}", param.name, param.ty),
            );
        }
        self.line(indent + 1, "body:");
        self.block(&func.body, indent + 1 + STEP);
    }

    fn block(&mut self, block: &Block, indent: usize) {
        self.line(indent, "Block");
        for stmt in &block.stmts {
            self.stmt(stmt, indent + STEP);
        }
    }

    fn labelled_block(&mut self, label: &str, block: Option<&Block>, indent: usize) {
        self.line(indent + STEP, label);
        match block {
            Some(block) => self.block(block, indent + 2 * STEP),
            None => self.line(indent + 2 * STEP, "(none)"),
        }
    }

    fn labelled_expr(&mut self, label: &str, expr: Option<&Expr>, indent: usize) {
        self.line(indent + STEP, label);
        self.opt_expr(expr, indent + 2 * STEP);
    }

    fn opt_expr(&mut self, expr: Option<&Expr>, indent: usize) {
        match expr {
            Some(expr) => self.expr(expr, indent),
            None => self.line(indent, "(none)"),
        }
    }

    fn stmt(&mut self, stmt: &Stmt, indent: usize) {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.line(indent, "ExprStmt");
                self.expr(expr, indent + STEP);
            }
            StmtKind::Return(value) => {
                self.line(indent, "Return");
                self.opt_expr(value.as_ref(), indent + STEP);
            }
            StmtKind::Break => self.line(indent, "Break"),
            StmtKind::Continue => self.line(indent, "Continue"),
            StmtKind::Block(block) => self.block(block, indent),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.line(indent, "If");
                self.labelled_expr("cond:", Some(cond), indent);
                self.labelled_block("then:", Some(then_branch), indent);
                self.labelled_block("else:", else_branch.as_ref(), indent);
            }
            StmtKind::ForWhile { cond, body } => {
                self.line(indent, "For(while-like)");
                self.labelled_expr("cond:", Some(cond), indent);
                self.labelled_block("body:", Some(body), indent);
            }
            StmtKind::ForC {
                init,
                cond,
                post,
                body,
            } => {
                self.line(indent, "For(C-like)");
                self.line(indent + STEP, "init:");
                match init {
                    Some(init) => self.stmt(init, indent + 2 * STEP),
                    None => self.line(indent + 2 * STEP, "(none)"),
                }
                self.labelled_expr("cond:", cond.as_ref(), indent);
                self.labelled_expr("post:", post.as_ref(), indent);
                self.labelled_block("body:", Some(body), indent);
            }
        }
    }

    fn expr(&mut self, expr: &Expr, indent: usize) {
        match &expr.kind {
            ExprKind::Ident(name) => self.line(indent, format_args!("Ident {name}")),
            ExprKind::Int(n) => self.line(indent, format_args!("Int {n}")),
            ExprKind::Float(f) => self.line(indent, format_args!("Float {}", format_general(*f))),
            ExprKind::Bool(b) => self.line(indent, format_args!("Bool {b}")),
            ExprKind::Str(raw) => self.line(indent, format_args!("String {raw}")),
            ExprKind::Grouping(inner) => {
                self.line(indent, "Group");
                self.expr(inner, indent + STEP);
            }
            ExprKind::Unary { op, operand } => {
                self.line(indent, format_args!("Unary {}", op.as_symbol()));
                self.expr(operand, indent + STEP);
            }
            ExprKind::Binary { left, op, right } => {
                self.line(indent, format_args!("Binary {}", op.as_symbol()));
                self.expr(left, indent + STEP);
                self.expr(right, indent + STEP);
            }
            ExprKind::Assign { target, op, value } => {
                self.line(indent, format_args!("Assign {}", op.as_symbol()));
                self.line(indent + STEP, format_args!("name: {target}"));
                self.expr(value, indent + STEP);
            }
            ExprKind::Ternary {
                cond,
                when_true,
                when_false,
            } => {
                self.line(indent, "Ternary");
                self.labelled_expr("cond:", Some(cond), indent);
                self.labelled_expr("true:", Some(when_true), indent);
                self.labelled_expr("false:", Some(when_false), indent);
            }
            ExprKind::Call { callee, args } => {
                self.line(indent, "Call");
                self.labelled_expr("callee:", Some(callee), indent);
                self.line(indent + STEP, "args:");
                for arg in args {
                    self.expr(arg, indent + 2 * STEP);
                }
            }
        }
    }
}
