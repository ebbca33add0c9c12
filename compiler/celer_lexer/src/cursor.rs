//! Byte cursor with line and column tracking.
//!
//! Advances through the source one byte at a time. Columns count bytes, so a
//! multi-byte character moves the column by its encoded width. Bulk skips
//! (line comments, block comments, string bodies) go through [`Cursor::jump_to`],
//! which recomputes line and column from the skipped region with `memchr`.

use celer_ir::{Position, Span};

pub(crate) struct Cursor<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current byte, or `None` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    #[inline]
    pub(crate) fn peek2(&self) -> Option<u8> {
        self.bytes.get(self.pos + 2).copied()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Line and column of the current byte.
    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Consume one byte, updating line and column.
    #[inline]
    pub(crate) fn advance(&mut self) {
        let Some(byte) = self.current() else {
            return;
        };
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Consume `n` bytes.
    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Consume the byte if it equals `expected`.
    #[inline]
    pub(crate) fn eat(&mut self, expected: u8) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume bytes while `pred` holds.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(byte) = self.current() {
            if !pred(byte) {
                break;
            }
            self.advance();
        }
    }

    /// Consume the whole UTF-8 character under the cursor.
    pub(crate) fn advance_char(&mut self) {
        let width = self
            .source
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.advance_n(width);
    }

    /// Skip to the next `\n` (not consumed) or to end of input.
    pub(crate) fn eat_until_newline_or_eof(&mut self) {
        let rest = &self.bytes[self.pos..];
        let target = memchr::memchr(b'\n', rest).map_or(self.bytes.len(), |i| self.pos + i);
        self.jump_to(target);
    }

    /// Skip past the next `*/`. Returns `false` (cursor at EOF) if there is none.
    pub(crate) fn skip_past_block_comment_end(&mut self) -> bool {
        let rest = &self.bytes[self.pos..];
        match memchr::memmem::find(rest, b"*/") {
            Some(i) => {
                self.jump_to(self.pos + i + 2);
                true
            }
            None => {
                self.jump_to(self.bytes.len());
                false
            }
        }
    }

    /// Skip to the next `"` or `\` inside a string body.
    pub(crate) fn skip_to_quote_or_backslash(&mut self) {
        let rest = &self.bytes[self.pos..];
        let target =
            memchr::memchr2(b'"', b'\\', rest).map_or(self.bytes.len(), |i| self.pos + i);
        self.jump_to(target);
    }

    /// Move to `target`, accounting for newlines between here and there.
    fn jump_to(&mut self, target: usize) {
        let target = target.min(self.bytes.len());
        let skipped = &self.bytes[self.pos..target];
        let newlines = memchr::memchr_iter(b'\n', skipped).count();
        if newlines == 0 {
            self.column += to_u32(skipped.len());
        } else {
            self.line += to_u32(newlines);
            let after_last = memchr::memrchr(b'\n', skipped).map_or(0, |i| skipped.len() - i - 1);
            self.column = 1 + to_u32(after_last);
        }
        self.pos = target;
    }

    /// Source text between `start` and the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }
}

#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
