//! Parse error type.

use std::fmt;

use celer_diagnostic::{Diagnostic, ErrorCode};
use celer_ir::{Position, Span, Token};
use celer_lexer::LexErrorKind;

/// A positioned syntax or lexical error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    pub pos: Position,
    pub span: Span,
    /// Label text shown at the error location.
    pub context: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span, pos: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            pos,
            span,
            context: None,
        }
    }

    /// Error located at `token`.
    ///
    /// When the token is `Illegal` the lexical problem is what gets reported;
    /// the parser's expectation survives as the label.
    #[cold]
    pub fn at_token(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        let message = message.into();
        match LexErrorKind::classify(token) {
            Some(kind) => ParseError::new(lex_error_code(&kind), kind.message(), token.span, token.pos)
                .with_context(message),
            None => ParseError::new(code, message, token.span, token.pos),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.pos, self.context.as_deref().unwrap_or("here"))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} {}", self.pos, self.message)
    }
}

fn lex_error_code(kind: &LexErrorKind) -> ErrorCode {
    match kind {
        LexErrorKind::UnterminatedString => ErrorCode::E0001,
        LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
        LexErrorKind::UnterminatedBlockComment => ErrorCode::E0003,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celer_ir::TokenKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_at_token_plain() {
        let token = Token::new(TokenKind::Ident, "x", Span::new(4, 5), Position::new(1, 5));
        let err = ParseError::at_token(ErrorCode::E1001, "expected ';'", &token);
        assert_eq!(err.code, ErrorCode::E1001);
        assert_eq!(err.message, "expected ';'");
        assert_eq!(err.context, None);
        assert_eq!(err.to_string(), "@1:5 expected ';'");
    }

    #[test]
    fn test_at_token_illegal_reports_lex_error() {
        let token = Token::new(TokenKind::Illegal, "@", Span::new(0, 1), Position::new(2, 1));
        let err = ParseError::at_token(ErrorCode::E1002, "expected expression", &token);
        assert_eq!(err.code, ErrorCode::E0002);
        assert_eq!(err.message, "invalid character '@'");
        assert_eq!(err.context.as_deref(), Some("expected expression"));
    }

    #[test]
    fn test_to_diagnostic() {
        let err = ParseError::new(ErrorCode::E1003, "expected ')'", Span::new(3, 4), Position::new(1, 4));
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1003);
        assert_eq!(diag.message, "expected ')'");
        assert_eq!(diag.primary_pos(), Some(Position::new(1, 4)));
        assert_eq!(diag.labels[0].message, "here");
    }
}
