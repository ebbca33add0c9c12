//! Token cursor over the pull lexer.
//!
//! Holds exactly two tokens: the one under inspection and the one just
//! consumed. Error positions are reported against either.

use celer_ir::{Position, Token, TokenKind};
use celer_lexer::Lexer;
use tracing::trace;

pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Cursor<'a> {
    /// Create a cursor and load the first token.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Cursor {
            lexer,
            current,
            previous: Token::dummy(TokenKind::Illegal),
        }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn previous(&self) -> &Token {
        &self.previous
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn previous_kind(&self) -> TokenKind {
        self.previous.kind
    }

    #[inline]
    pub fn current_pos(&self) -> Position {
        self.current.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &Token {
        let next = self.lexer.next_token();
        self.previous = std::mem::replace(&mut self.current, next);
        trace!(token = ?self.previous, "advance");
        &self.previous
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_shifts_previous() {
        let mut cursor = Cursor::new("a b");
        assert_eq!(cursor.current().lexeme, "a");
        assert_eq!(cursor.previous_kind(), TokenKind::Illegal);
        cursor.advance();
        assert_eq!(cursor.previous().lexeme, "a");
        assert_eq!(cursor.current().lexeme, "b");
    }

    #[test]
    fn test_eat() {
        let mut cursor = Cursor::new("; x");
        assert!(!cursor.eat(TokenKind::Comma));
        assert!(cursor.eat(TokenKind::Semicolon));
        assert!(cursor.check(TokenKind::Ident));
    }

    #[test]
    fn test_end_is_sticky() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.previous_kind(), TokenKind::Eof);
    }
}
