//! Lexer for Celer.
//!
//! Pull-based: the parser asks for one token at a time with
//! [`Lexer::next_token`], and once the input is exhausted every further call
//! yields an `Eof` token. The lexer never fails; malformed input becomes a
//! `TokenKind::Illegal` token (see [`LexErrorKind`]).
//!
//! Whitespace is space, tab, CR and LF. `*--` starts a comment that runs to
//! the end of the line; `/* ... */` is a block comment and does not nest.

mod cursor;
mod keywords;
mod lex_error;
mod unescape;

use celer_ir::{Position, Token, TokenKind};
use cursor::Cursor;

pub use lex_error::{LexErrorKind, UNTERMINATED_BLOCK_COMMENT, UNTERMINATED_STRING};
pub use unescape::unescape_string_literal;

/// Streaming tokenizer over a source buffer.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        if !self.skip_trivia() {
            // Unterminated block comment: the cursor now sits at EOF.
            let pos = self.cursor.position();
            let span = self.cursor.span_from(self.cursor.pos());
            return Token::new(TokenKind::Illegal, UNTERMINATED_BLOCK_COMMENT, span, pos);
        }

        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        let Some(byte) = self.cursor.current() else {
            return Token::new(TokenKind::Eof, "", self.cursor.span_from(start), start_pos);
        };

        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start, start_pos),
            b'0'..=b'9' => self.number(start, start_pos),
            b'"' => self.string(start, start_pos),
            b'+' => self.with_eq(start, start_pos, TokenKind::Plus, TokenKind::PlusEq),
            b'-' => self.minus_or_arrow(start, start_pos),
            b'*' => self.with_eq(start, start_pos, TokenKind::Star, TokenKind::StarEq),
            b'/' => self.with_eq(start, start_pos, TokenKind::Slash, TokenKind::SlashEq),
            b'%' => self.with_eq(start, start_pos, TokenKind::Percent, TokenKind::PercentEq),
            b'=' => self.with_eq(start, start_pos, TokenKind::Eq, TokenKind::EqEq),
            b'!' => self.with_eq(start, start_pos, TokenKind::Bang, TokenKind::NotEq),
            b'<' => self.with_eq(start, start_pos, TokenKind::Lt, TokenKind::LtEq),
            b'>' => self.with_eq(start, start_pos, TokenKind::Gt, TokenKind::GtEq),
            b'&' => self.doubled(start, start_pos, b'&', TokenKind::AmpAmp),
            b'|' => self.doubled(start, start_pos, b'|', TokenKind::PipePipe),
            b'(' => self.single(start, start_pos, TokenKind::LParen),
            b')' => self.single(start, start_pos, TokenKind::RParen),
            b'{' => self.single(start, start_pos, TokenKind::LBrace),
            b'}' => self.single(start, start_pos, TokenKind::RBrace),
            b'[' => self.single(start, start_pos, TokenKind::LBracket),
            b']' => self.single(start, start_pos, TokenKind::RBracket),
            b',' => self.single(start, start_pos, TokenKind::Comma),
            b';' => self.single(start, start_pos, TokenKind::Semicolon),
            b':' => self.single(start, start_pos, TokenKind::Colon),
            b'?' => self.single(start, start_pos, TokenKind::Question),
            _ => self.invalid_char(start, start_pos),
        }
    }

    /// Skip whitespace and comments. Returns `false` on an unterminated
    /// block comment.
    fn skip_trivia(&mut self) -> bool {
        loop {
            self.cursor
                .eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
            match (
                self.cursor.current(),
                self.cursor.peek(),
                self.cursor.peek2(),
            ) {
                (Some(b'*'), Some(b'-'), Some(b'-')) => {
                    self.cursor.advance_n(3);
                    self.cursor.eat_until_newline_or_eof();
                }
                (Some(b'/'), Some(b'*'), _) => {
                    self.cursor.advance_n(2);
                    if !self.cursor.skip_past_block_comment_end() {
                        return false;
                    }
                }
                _ => return true,
            }
        }
    }

    fn finish(&self, kind: TokenKind, start: usize, pos: Position) -> Token {
        Token::new(
            kind,
            self.cursor.slice_from(start),
            self.cursor.span_from(start),
            pos,
        )
    }

    fn single(&mut self, start: usize, pos: Position, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.finish(kind, start, pos)
    }

    /// `op` or `op=`.
    fn with_eq(&mut self, start: usize, pos: Position, bare: TokenKind, eq: TokenKind) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat(b'=') { eq } else { bare };
        self.finish(kind, start, pos)
    }

    fn minus_or_arrow(&mut self, start: usize, pos: Position) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat(b'=') {
            TokenKind::MinusEq
        } else if self.cursor.eat(b'>') {
            TokenKind::Arrow
        } else {
            TokenKind::Minus
        };
        self.finish(kind, start, pos)
    }

    /// `&&` / `||`. A lone `&` or `|` is illegal.
    fn doubled(&mut self, start: usize, pos: Position, byte: u8, kind: TokenKind) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat(byte) {
            kind
        } else {
            TokenKind::Illegal
        };
        self.finish(kind, start, pos)
    }

    fn invalid_char(&mut self, start: usize, pos: Position) -> Token {
        self.cursor.advance_char();
        self.finish(TokenKind::Illegal, start, pos)
    }

    fn identifier(&mut self, start: usize, pos: Position) -> Token {
        self.cursor
            .eat_while(|b| b == b'_' || b.is_ascii_alphanumeric());
        let text = self.cursor.slice_from(start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        self.finish(kind, start, pos)
    }

    /// Digits, optionally followed by `.` and at least one digit.
    fn number(&mut self, start: usize, pos: Position) -> Token {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut kind = TokenKind::Int;
        if self.cursor.current() == Some(b'.')
            && self.cursor.peek().is_some_and(|b| b.is_ascii_digit())
        {
            kind = TokenKind::Float;
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        self.finish(kind, start, pos)
    }

    /// String literal; the lexeme keeps both quotes and raw escapes.
    fn string(&mut self, start: usize, pos: Position) -> Token {
        self.cursor.advance();
        loop {
            self.cursor.skip_to_quote_or_backslash();
            match self.cursor.current() {
                Some(b'"') => {
                    self.cursor.advance();
                    return self.finish(TokenKind::Str, start, pos);
                }
                Some(_) => {
                    // Backslash: consume it and whatever it escapes.
                    self.cursor.advance_n(2);
                }
                None => {
                    return Token::new(
                        TokenKind::Illegal,
                        UNTERMINATED_STRING,
                        self.cursor.span_from(start),
                        pos,
                    );
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and excluding `Eof`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Tokenize a whole source buffer. The result always ends with one `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}
