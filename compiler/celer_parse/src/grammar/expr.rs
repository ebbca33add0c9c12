//! Expression parsing.
//!
//! Precedence climbing over ten levels. Binary operators are
//! left-associative; assignment is right-associative and only accepts a
//! bare identifier on its left. Calls are postfix and bind tighter than any
//! binary operator. The bracketed ternary is tried once, after the binary
//! expression is complete, and only at or below `||` precedence.

use celer_diagnostic::ErrorCode;
use celer_ir::{AssignOp, BinaryOp, Expr, ExprKind, TokenKind, UnaryOp};
use celer_stack::ensure_sufficient_stack;

use crate::Parser;

/// Binding power, lowest to highest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Assign,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
}

impl Precedence {
    fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq => Precedence::Assign,
            TokenKind::PipePipe => Precedence::Or,
            TokenKind::AmpAmp => Precedence::And,
            TokenKind::EqEq | TokenKind::NotEq => Precedence::Equality,
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
                Precedence::Comparison
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Factor,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }

    /// Level of the right operand of a left-associative binary operator.
    fn tighter(self) -> Precedence {
        match self {
            Precedence::Lowest => Precedence::Assign,
            Precedence::Assign => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary | Precedence::Call => Precedence::Call,
        }
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    })
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parse a full expression (assignment level).
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_precedence(Precedence::Assign)
    }

    /// Parse an expression whose operators bind at least as tightly as `min`.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot overflow.
    fn parse_precedence(&mut self, min: Precedence) -> Expr {
        ensure_sufficient_stack(|| self.parse_precedence_inner(min))
    }

    fn parse_precedence_inner(&mut self, min: Precedence) -> Expr {
        let mut left = self.parse_unary();

        loop {
            if self.check(TokenKind::LParen) {
                left = self.parse_call_suffix(left);
                continue;
            }

            let kind = self.current_kind();
            let prec = Precedence::of(kind);
            if prec == Precedence::Lowest || prec < min {
                break;
            }

            if let Some(op) = assign_op(kind) {
                let Some(target) = left.as_ident().map(str::to_owned) else {
                    self.error_at_previous(
                        ErrorCode::E1007,
                        "left side of assignment must be an identifier",
                    );
                    self.advance();
                    // Parse and drop the right-hand side to get past it.
                    let _ = self.parse_precedence(Precedence::Assign);
                    break;
                };
                self.advance();
                let value = self.parse_precedence(Precedence::Assign);
                let pos = left.pos;
                left = Expr::new(
                    ExprKind::Assign {
                        target,
                        op,
                        value: Box::new(value),
                    },
                    pos,
                );
                continue;
            }

            let Some(op) = binary_op(kind) else {
                break;
            };
            let pos = self.current_pos();
            self.advance();
            let right = self.parse_precedence(prec.tighter());
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                pos,
            );
        }

        if min <= Precedence::Or && self.check(TokenKind::Question) {
            left = self.parse_ternary_suffix(left);
        }

        left
    }

    /// `!x` or `-x`; the operand is parsed at unary level.
    fn parse_unary(&mut self) -> Expr {
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        let pos = self.current_pos();
        self.advance();
        let operand = self.parse_precedence(Precedence::Unary);
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            pos,
        )
    }

    fn parse_primary(&mut self) -> Expr {
        let pos = self.current_pos();
        let kind = match self.current_kind() {
            TokenKind::Ident => ExprKind::Ident(self.advance().lexeme.clone()),
            // Out-of-range literals saturate.
            TokenKind::Int => ExprKind::Int(self.advance().lexeme.parse().unwrap_or(i64::MAX)),
            TokenKind::Float => ExprKind::Float(self.advance().lexeme.parse().unwrap_or(0.0)),
            TokenKind::Str => ExprKind::Str(self.advance().lexeme.clone()),
            TokenKind::True => {
                self.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Bool(false)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression();
                self.consume(TokenKind::RParen, ErrorCode::E1003, "expected ')'");
                ExprKind::Grouping(Box::new(inner))
            }
            _ => {
                self.error_at_current(ErrorCode::E1002, "expected expression");
                let pos = self.advance().pos;
                return Expr::new(ExprKind::Int(0), pos);
            }
        };
        Expr::new(kind, pos)
    }

    /// `callee(arg, ...)`
    fn parse_call_suffix(&mut self, callee: Expr) -> Expr {
        let pos = self.current_pos();
        self.advance();
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression());
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(
            TokenKind::RParen,
            ErrorCode::E1003,
            "expected ')' after arguments",
        );
        Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            pos,
        )
    }

    /// `cond ? { true : a : false : b }`
    fn parse_ternary_suffix(&mut self, cond: Expr) -> Expr {
        self.advance();
        self.consume(TokenKind::LBrace, ErrorCode::E1001, "expected '{' after '?'");
        self.consume(TokenKind::True, ErrorCode::E1001, "expected 'true' in ternary");
        self.consume(TokenKind::Colon, ErrorCode::E1001, "expected ':' after 'true'");
        let when_true = self.parse_expression();
        self.consume(
            TokenKind::Colon,
            ErrorCode::E1001,
            "expected ':' between ternary branches",
        );
        self.consume(TokenKind::False, ErrorCode::E1001, "expected 'false' in ternary");
        self.consume(TokenKind::Colon, ErrorCode::E1001, "expected ':' after 'false'");
        let when_false = self.parse_expression();
        self.consume(
            TokenKind::RBrace,
            ErrorCode::E1003,
            "expected '}' to close ternary",
        );
        let pos = cond.pos;
        Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                when_true: Box::new(when_true),
                when_false: Box::new(when_false),
            },
            pos,
        )
    }
}

#[cfg(test)]
mod tests;
