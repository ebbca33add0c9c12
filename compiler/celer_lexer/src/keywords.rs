//! Reserved word resolution.
//!
//! Keywords are case-sensitive: `Function` is a keyword, `function` is an
//! ordinary identifier. Lookup buckets by length first (all keywords are
//! 2-8 bytes) and only then compares text.

use celer_ir::TokenKind;

/// Look up a reserved word. Returns `None` for ordinary identifiers.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "for" => Some(TokenKind::For),
            "int" => Some(TokenKind::IntType),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "bool" => Some(TokenKind::BoolType),
            "true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "const" => Some(TokenKind::Const),
            "break" => Some(TokenKind::Break),
            "float" => Some(TokenKind::FloatType),
            "false" => Some(TokenKind::False),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            "string" => Some(TokenKind::StringType),
            _ => None,
        },
        8 => match text {
            "variable" => Some(TokenKind::Variable),
            "Function" => Some(TokenKind::Function),
            "continue" => Some(TokenKind::Continue),
            _ => None,
        },
        _ => None,
    }
}
