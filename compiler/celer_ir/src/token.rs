//! Token types for the Celer lexer.
//!
//! A token owns its lexeme so the parser can pull tokens one at a time
//! without borrowing the source buffer. Literal values are decoded by the
//! parser (numbers) or the evaluator (strings) from the lexeme.

use super::{Position, Span};
use std::fmt;

/// A classified lexical unit with its source provenance.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. For `Illegal` tokens this is the
    /// diagnostic message or the offending character; empty for `Eof`.
    pub lexeme: String,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, pos: Position) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
            pos,
        }
    }

    /// Create a dummy token for tests and synthesized input.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            lexeme: String::new(),
            span: Span::DUMMY,
            pos: Position::START,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.lexeme, self.pos)
    }
}

/// Token kinds for Celer.
///
/// Fieldless so the kind is `Copy` and fits a bitset; the payload of
/// literals and identifiers lives in [`Token::lexeme`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Int,
    Float,
    Str,

    // Keywords
    Variable,
    Const,
    /// Capitalized `Function`; lowercase `function` is an identifier.
    Function,
    Return,
    For,
    If,
    Else,
    Break,
    Continue,
    IntType,
    BoolType,
    FloatType,
    StringType,
    True,
    False,

    // Operators
    Plus,
    PlusEq,
    Minus,
    MinusEq,
    Arrow,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    Eq,
    EqEq,
    Bang,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Question,

    // Special
    Illegal,
    Eof,
}

impl TokenKind {
    /// Number of token kinds; every discriminant is below this.
    pub const COUNT: u8 = TokenKind::Eof as u8 + 1;

    /// Bit index of this kind, used by parser token sets.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in diagnostics and token dumps.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::Str => "string literal",
            TokenKind::Variable => "variable",
            TokenKind::Const => "const",
            TokenKind::Function => "Function",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::IntType => "int",
            TokenKind::BoolType => "bool",
            TokenKind::FloatType => "float",
            TokenKind::StringType => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Plus => "+",
            TokenKind::PlusEq => "+=",
            TokenKind::Minus => "-",
            TokenKind::MinusEq => "-=",
            TokenKind::Arrow => "->",
            TokenKind::Star => "*",
            TokenKind::StarEq => "*=",
            TokenKind::Slash => "/",
            TokenKind::SlashEq => "/=",
            TokenKind::Percent => "%",
            TokenKind::PercentEq => "%=",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Bang => "!",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Illegal => "illegal token",
            TokenKind::Eof => "end of file",
        }
    }

    /// Check if this kind is one of the 15 reserved words.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Variable
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::IntType
                | TokenKind::BoolType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
