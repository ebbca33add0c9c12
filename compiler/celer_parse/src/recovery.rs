//! Error recovery for the parser.
//!
//! Provides token sets and synchronization for continuing parsing after errors.
//! Uses bitset-based O(1) membership testing.

use super::cursor::Cursor;
use celer_ir::TokenKind;

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `TokenKind` discriminant index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u128);

const _: () = assert!(TokenKind::COUNT <= 128);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens that can start a top-level declaration.
pub const DECL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Variable)
    .with(TokenKind::Const)
    .with(TokenKind::Function);

/// Tokens that introduce a statement with a keyword.
pub const STMT_KEYWORD: TokenSet = TokenSet::new()
    .with(TokenKind::If)
    .with(TokenKind::For)
    .with(TokenKind::Return)
    .with(TokenKind::Break)
    .with(TokenKind::Continue);

/// Where top-level recovery resumes: any declaration or statement keyword,
/// or a closing brace.
pub const SYNC_POINTS: TokenSet = DECL_START
    .union(STMT_KEYWORD)
    .with(TokenKind::RBrace);

/// Skip tokens until a synchronization point.
///
/// Stops when the token just consumed is `;`, when the current token is in
/// `recovery`, or at end of input. Returns `false` only at end of input.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> bool {
    while !cursor.is_at_end() {
        if cursor.previous_kind() == TokenKind::Semicolon || recovery.contains(cursor.current_kind())
        {
            return true;
        }
        cursor.advance();
    }
    false
}
