//! Declarations and type annotations.

use celer_diagnostic::ErrorCode;
use celer_ir::{Declaration, FunctionDecl, FunctionRef, Param, TokenKind, TypeSpec, VarDecl};
use tracing::debug;

use crate::Parser;

impl Parser<'_> {
    /// One top-level item.
    ///
    /// Anything other than a variable, constant or function is parsed as a
    /// statement and discarded.
    pub(crate) fn parse_declaration(&mut self) -> Option<Declaration> {
        match self.current_kind() {
            TokenKind::Variable | TokenKind::Const => {
                self.parse_var_decl().map(Declaration::Variable)
            }
            TokenKind::Function => self
                .parse_function_decl()
                .map(|func| Declaration::Function(FunctionRef::new(func))),
            _ => {
                let orphan = self.parse_statement();
                debug!(pos = %orphan.pos, "discarding top-level statement");
                None
            }
        }
    }

    /// `(variable|const) name : type = init ;`
    ///
    /// Returns `None` when the name is missing; nothing after the keyword is
    /// consumed in that case.
    pub(crate) fn parse_var_decl(&mut self) -> Option<VarDecl> {
        let pos = self.current_pos();
        let is_const = self.advance().kind == TokenKind::Const;
        if !self.check(TokenKind::Ident) {
            self.error_at_current(ErrorCode::E1004, "expected identifier");
            return None;
        }
        let name = self.advance().lexeme.clone();
        self.consume(TokenKind::Colon, ErrorCode::E1001, "expected ':' after name");
        let ty = self.parse_type();
        self.consume(TokenKind::Eq, ErrorCode::E1001, "expected '=' in initialization");
        let init = self.parse_expression();
        self.consume(
            TokenKind::Semicolon,
            ErrorCode::E1001,
            "expected ';' at end of declaration",
        );
        Some(VarDecl {
            name,
            is_const,
            ty,
            init: Some(init),
            pos,
        })
    }

    /// `Function name(p: type, ...) -> type { body }`
    pub(crate) fn parse_function_decl(&mut self) -> Option<FunctionDecl> {
        let pos = self.current_pos();
        self.advance();
        if !self.check(TokenKind::Ident) {
            self.error_at_current(ErrorCode::E1006, "expected function name");
            return None;
        }
        let name = self.advance().lexeme.clone();
        self.consume(TokenKind::LParen, ErrorCode::E1006, "expected '('");

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if !self.check(TokenKind::Ident) {
                    self.error_at_current(ErrorCode::E1004, "expected parameter name");
                    break;
                }
                let name = self.advance().lexeme.clone();
                self.consume(
                    TokenKind::Colon,
                    ErrorCode::E1001,
                    "expected ':' after parameter",
                );
                let ty = self.parse_type();
                params.push(Param { name, ty });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(
            TokenKind::RParen,
            ErrorCode::E1003,
            "expected ')' to close parameters",
        );
        self.consume(
            TokenKind::Arrow,
            ErrorCode::E1006,
            "expected '->' before return type",
        );
        let return_type = self.parse_type();
        let body = self.parse_block();
        Some(FunctionDecl {
            name,
            params,
            return_type,
            body,
            pos,
        })
    }

    /// `int`, `bool`, `float`, `string`, or the identifier `void`.
    ///
    /// A missing type is recorded and treated as `void`.
    fn parse_type(&mut self) -> TypeSpec {
        let ty = match self.current_kind() {
            TokenKind::IntType => TypeSpec::Int,
            TokenKind::BoolType => TypeSpec::Bool,
            TokenKind::FloatType => TypeSpec::Float,
            TokenKind::StringType => TypeSpec::String,
            TokenKind::Ident if self.current().lexeme == "void" => TypeSpec::Void,
            _ => {
                self.error_at_current(
                    ErrorCode::E1005,
                    "expected type (int, bool, float, string)",
                );
                return TypeSpec::Void;
            }
        };
        self.advance();
        ty
    }
}
