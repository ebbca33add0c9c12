//! Statements and blocks.

use celer_diagnostic::ErrorCode;
use celer_ir::{AssignOp, Block, Expr, ExprKind, Position, Stmt, StmtKind, TokenKind, VarDecl};
use celer_stack::ensure_sufficient_stack;

use crate::Parser;

/// Rewrite a block-local `variable`/`const` declaration into an assignment
/// statement at the same position. Constness and type are not retained.
fn desugar_local(decl: VarDecl) -> Option<Stmt> {
    let init = decl.init?;
    let assign = Expr::new(
        ExprKind::Assign {
            target: decl.name,
            op: AssignOp::Assign,
            value: Box::new(init),
        },
        decl.pos,
    );
    Some(Stmt::new(StmtKind::Expr(assign), decl.pos))
}

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Stmt {
        let pos = self.current_pos();
        match self.current_kind() {
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                self.advance();
                self.consume(TokenKind::Semicolon, ErrorCode::E1001, "expected ';' after 'break'");
                Stmt::new(StmtKind::Break, pos)
            }
            TokenKind::Continue => {
                self.advance();
                self.consume(
                    TokenKind::Semicolon,
                    ErrorCode::E1001,
                    "expected ';' after 'continue'",
                );
                Stmt::new(StmtKind::Continue, pos)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::LBrace => Stmt::new(StmtKind::Block(self.parse_block()), pos),
            _ => {
                let expr = self.parse_expression();
                self.consume(
                    TokenKind::Semicolon,
                    ErrorCode::E1001,
                    "expected ';' at end of statement",
                );
                Stmt::new(StmtKind::Expr(expr), pos)
            }
        }
    }

    /// `{ item* }`
    ///
    /// Local variable declarations become assignments; function declarations
    /// are parsed (to get past them) and rejected.
    pub(crate) fn parse_block(&mut self) -> Block {
        let pos = self.current_pos();
        self.consume(TokenKind::LBrace, ErrorCode::E1001, "expected '{'");
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Variable | TokenKind::Const => {
                    if let Some(stmt) = self.parse_var_decl().and_then(desugar_local) {
                        stmts.push(stmt);
                    }
                }
                TokenKind::Function => {
                    if self.parse_function_decl().is_some() {
                        self.error_at_previous(
                            ErrorCode::E1008,
                            "function declaration not allowed inside block",
                        );
                    }
                }
                _ => stmts.push(self.parse_statement()),
            }
        }
        self.consume(TokenKind::RBrace, ErrorCode::E1003, "expected '}'");
        Block::new(stmts, pos)
    }

    /// `return;` or `return expr;`
    fn parse_return(&mut self) -> Stmt {
        let pos = self.current_pos();
        self.advance();
        if self.eat(TokenKind::Semicolon) {
            return Stmt::new(StmtKind::Return(None), pos);
        }
        let value = self.parse_expression();
        self.consume(
            TokenKind::Semicolon,
            ErrorCode::E1001,
            "expected ';' after return value",
        );
        Stmt::new(StmtKind::Return(Some(value)), pos)
    }

    /// `if (cond) { ... } else { ... }`
    fn parse_if(&mut self) -> Stmt {
        let pos = self.current_pos();
        self.advance();
        self.consume(TokenKind::LParen, ErrorCode::E1001, "expected '(' after 'if'");
        let cond = self.parse_expression();
        self.consume(TokenKind::RParen, ErrorCode::E1003, "expected ')'");
        let then_branch = self.parse_block();
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.parse_block())
        } else {
            None
        };
        Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            pos,
        )
    }

    /// Both `for` spellings.
    ///
    /// - `for (; cond; post)`: C-like, no initializer
    /// - `for (variable k: int = 0; cond; post)`: C-like, declaration as initializer
    /// - `for (cond)`: while-like
    /// - `for (init; cond; post)`: C-like, expression initializer
    fn parse_for(&mut self) -> Stmt {
        let pos = self.current_pos();
        self.advance();
        self.consume(TokenKind::LParen, ErrorCode::E1001, "expected '(' after 'for'");

        if self.eat(TokenKind::Semicolon) {
            return self.parse_for_rest(pos, None);
        }

        if self.check(TokenKind::Variable) || self.check(TokenKind::Const) {
            let init = self.parse_var_decl().and_then(desugar_local);
            return self.parse_for_rest(pos, init);
        }

        let first = self.parse_expression();
        if self.eat(TokenKind::RParen) {
            let body = self.parse_block();
            return Stmt::new(StmtKind::ForWhile { cond: first, body }, pos);
        }

        self.consume(TokenKind::Semicolon, ErrorCode::E1001, "expected ';' in for");
        let init_pos = first.pos;
        self.parse_for_rest(pos, Some(Stmt::new(StmtKind::Expr(first), init_pos)))
    }

    /// `cond? ; post? ) { body }` after the initializer.
    fn parse_for_rest(&mut self, pos: Position, init: Option<Stmt>) -> Stmt {
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.consume(TokenKind::Semicolon, ErrorCode::E1001, "expected ';' in for");
        let post = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.consume(TokenKind::RParen, ErrorCode::E1003, "expected ')' to close for");
        let body = self.parse_block();
        Stmt::new(
            StmtKind::ForC {
                init: init.map(Box::new),
                cond,
                post,
                body,
            },
            pos,
        )
    }
}
