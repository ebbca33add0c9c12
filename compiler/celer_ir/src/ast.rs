//! AST node types.
//!
//! Tagged variants with exhaustive matching: adding a variant forces every
//! consumer (parser, evaluator, dump) to handle it. Every node carries the
//! [`Position`] of the token that introduced it.

mod operators;
mod types;

pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use types::TypeSpec;

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Position;

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    /// Name of the identifier, if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Raw lexeme including quotes; escapes are decoded at evaluation.
    Str(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Assignment to a bare name; there are no computed lvalues.
    Assign {
        target: String,
        op: AssignOp,
        value: Box<Expr>,
    },
    Grouping(Box<Expr>),
    /// `cond ? { true : a : false : b }`
    Ternary {
        cond: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// A `{ ... }` statement sequence.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, pos: Position) -> Self {
        Block { stmts, pos }
    }
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

/// Statement variants.
///
/// Both `for` spellings collapse into `ForWhile` or `ForC`. Nested
/// variable declarations are desugared to `Expr(Assign)` by the parser,
/// so there is no declaration statement.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    Return(Option<Expr>),
    Break,
    Continue,
    Block(Block),
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    /// `for (cond) { body }`
    ForWhile { cond: Expr, body: Block },
    /// `for (init; cond; post) { body }`, every header part optional.
    ForC {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Expr>,
        body: Block,
    },
}

/// `variable name: type = init;` or `const name: type = init;`
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub is_const: bool,
    pub ty: TypeSpec,
    pub init: Option<Expr>,
    pub pos: Position,
}

/// A function parameter `name: type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeSpec,
}

/// `Function name(params) -> type { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeSpec,
    pub body: Block,
    pub pos: Position,
}

/// Shared handle to a function declaration.
///
/// The `Program` holds one handle and every environment that registers
/// the function holds another, so a long-lived environment (the REPL)
/// keeps functions alive after the chunk that declared them is dropped.
/// Function handles never reference scopes, so no cycle can form.
#[repr(transparent)]
pub struct FunctionRef(Rc<FunctionDecl>);

impl FunctionRef {
    pub fn new(decl: FunctionDecl) -> Self {
        FunctionRef(Rc::new(decl))
    }

    /// Whether two handles point at the same declaration.
    #[inline]
    pub fn ptr_eq(&self, other: &FunctionRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Clone for FunctionRef {
    #[inline]
    fn clone(&self) -> Self {
        FunctionRef(Rc::clone(&self.0))
    }
}

impl Deref for FunctionRef {
    type Target = FunctionDecl;

    #[inline]
    fn deref(&self) -> &FunctionDecl {
        &self.0
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Variable(VarDecl),
    Function(FunctionRef),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(var) => &var.name,
            Declaration::Function(func) => &func.name,
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            Declaration::Variable(var) => var.pos,
            Declaration::Function(func) => func.pos,
        }
    }
}

/// Ordered declaration sequence; owner of the whole tree below it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub decls: Vec<Declaration>,
}

impl Program {
    pub fn new() -> Self {
        Program { decls: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionRef> {
        self.decls.iter().filter_map(|decl| match decl {
            Declaration::Function(func) => Some(func),
            Declaration::Variable(_) => None,
        })
    }

    /// Variable and constant declarations in source order.
    pub fn variables(&self) -> impl Iterator<Item = &VarDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Declaration::Variable(var) => Some(var),
            Declaration::Function(_) => None,
        })
    }
}
