//! Celer IR - shared data types for the Celer pipeline.
//!
//! This crate contains the data structures every other Celer crate speaks:
//! - Spans and line/column positions for source locations
//! - Token kinds and owned tokens produced by the lexer
//! - The AST (Expr, Stmt, Declaration, Program)
//!
//! # Ownership
//!
//! The AST is a strict tree: a `Program` owns its declarations, which own
//! their statements, which own their expressions. The only shared node is
//! the function declaration, held through [`FunctionRef`] so an environment
//! can keep a handle to it without borrowing from the `Program`.

pub mod ast;
mod span;
mod token;

pub use ast::{
    AssignOp, BinaryOp, Block, Declaration, Expr, ExprKind, FunctionDecl, FunctionRef, Param,
    Program, Stmt, StmtKind, TypeSpec, UnaryOp, VarDecl,
};
pub use span::{Position, Span};
pub use token::{Token, TokenKind};
