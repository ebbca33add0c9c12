//! Recursive descent parser for Celer.
//!
//! Pulls tokens from the lexer on demand and builds an owned [`Program`].
//! Parsing never aborts: every problem is recorded as a [`ParseError`] and
//! the parser keeps going, so callers always get a (possibly partial)
//! program plus the ordered error list.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::{synchronize, TokenSet, SYNC_POINTS};

use celer_diagnostic::{Diagnostic, ErrorCode};
use celer_ir::{Position, Program, Token, TokenKind};
use tracing::debug;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            errors: Vec::new(),
        }
    }

    // Cursor delegation.

    #[inline]
    fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_pos(&self) -> Position {
        self.cursor.current_pos()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    /// Whether any error has been recorded so far.
    #[inline]
    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record an error at the current token.
    #[cold]
    fn error_at_current(&mut self, code: ErrorCode, message: &str) {
        let error = ParseError::at_token(code, message, self.cursor.current());
        debug!(%error, "parse error");
        self.errors.push(error);
    }

    /// Record an error at the token just consumed.
    #[cold]
    fn error_at_previous(&mut self, code: ErrorCode, message: &str) {
        let token = self.cursor.previous();
        let error = ParseError::new(code, message, token.span, token.pos);
        debug!(%error, "parse error");
        self.errors.push(error);
    }

    /// Consume a token of the given kind or record `message`.
    ///
    /// On mismatch the cursor only moves if the offending token is
    /// `Illegal`, so a stray illegal character cannot wedge the parser.
    fn consume(&mut self, kind: TokenKind, code: ErrorCode, message: &str) {
        if self.eat(kind) {
            return;
        }
        self.error_at_current(code, message);
        if self.check(TokenKind::Illegal) {
            self.advance();
        }
    }

    /// Parse declarations until end of input.
    ///
    /// Once any error has been recorded, every declaration is followed by a
    /// synchronization pass.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut program = Program::new();
        while !self.is_at_end() {
            if let Some(decl) = self.parse_declaration() {
                debug!(name = decl.name(), pos = %decl.pos(), "declaration");
                program.decls.push(decl);
            }
            if self.has_errors() {
                synchronize(&mut self.cursor, SYNC_POINTS);
            }
        }
        ParseOutput {
            program,
            errors: self.errors,
        }
    }
}

/// A parsed program with every error found along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors converted to diagnostics, in discovery order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }
}

/// Parse source text into a program.
pub fn parse(source: &str) -> ParseOutput {
    Parser::new(source).parse_program()
}
