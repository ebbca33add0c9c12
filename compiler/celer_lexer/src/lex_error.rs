//! Classification of `Illegal` tokens.
//!
//! The lexer never fails: malformed input becomes a `TokenKind::Illegal`
//! token whose lexeme is either a fixed message or the offending character.
//! [`LexErrorKind::classify`] recovers which case a given token is so the
//! parser can attach a precise error code.

use celer_ir::{Token, TokenKind};

pub const UNTERMINATED_STRING: &str = "Unterminated string literal";
pub const UNTERMINATED_BLOCK_COMMENT: &str = "Unterminated block comment";

/// What kind of lexical error an `Illegal` token represents.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing `"`. Reported at the opening quote.
    UnterminatedString,
    /// Missing `*/`. Reported where scanning stopped.
    UnterminatedBlockComment,
    /// A character that starts no token (including a lone `&` or `|`).
    InvalidCharacter(String),
}

impl LexErrorKind {
    /// Classify an `Illegal` token. Returns `None` for any other kind.
    pub fn classify(token: &Token) -> Option<LexErrorKind> {
        if token.kind != TokenKind::Illegal {
            return None;
        }
        Some(match token.lexeme.as_str() {
            UNTERMINATED_STRING => LexErrorKind::UnterminatedString,
            UNTERMINATED_BLOCK_COMMENT => LexErrorKind::UnterminatedBlockComment,
            other => LexErrorKind::InvalidCharacter(other.to_string()),
        })
    }

    /// Human-readable message for diagnostics.
    pub fn message(&self) -> String {
        match self {
            LexErrorKind::UnterminatedString => UNTERMINATED_STRING.to_string(),
            LexErrorKind::UnterminatedBlockComment => UNTERMINATED_BLOCK_COMMENT.to_string(),
            LexErrorKind::InvalidCharacter(ch) => format!("invalid character '{ch}'"),
        }
    }
}
