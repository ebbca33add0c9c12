//! Line lookup helpers for rendering source snippets.

/// Pre-computed line offset table.
///
/// Stores the byte offset of every line start so the emitter can fetch the
/// text of a line by number in O(1).
///
/// # Example
///
/// ```
/// use celer_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_count(), 3);
/// assert_eq!(table.line_text(source, 2), Some("line2"));
/// assert_eq!(table.line_from_offset(7), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// offsets[0] = 0 (line 1 starts at byte 0), offsets[n] = start of line n+1.
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineOffsetTable { offsets }
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// 1-based line containing the given byte offset.
    pub fn line_from_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(exact) => exact + 1,
            Err(insert) => insert.max(1),
        }
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text<'s>(&self, source: &'s str, line: usize) -> Option<&'s str> {
        let start = *self.offsets.get(line.checked_sub(1)?)?;
        let end = self
            .offsets
            .get(line)
            .map_or(source.len(), |next| next.saturating_sub(1));
        source
            .get(start..end.max(start))
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_with_crlf() {
        let source = "a\r\nbb\r\nccc";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 1), Some("a"));
        assert_eq!(table.line_text(source, 2), Some("bb"));
        assert_eq!(table.line_text(source, 3), Some("ccc"));
        assert_eq!(table.line_text(source, 4), None);
        assert_eq!(table.line_text(source, 0), None);
    }

    #[test]
    fn test_line_from_offset() {
        let source = "ab\ncd\n";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_from_offset(0), 1);
        assert_eq!(table.line_from_offset(2), 1);
        assert_eq!(table.line_from_offset(3), 2);
        assert_eq!(table.line_from_offset(6), 3);
    }

    #[test]
    fn test_empty_source() {
        let table = LineOffsetTable::build("");
        assert_eq!(table.line_count(), 1);
        assert_eq!(table.line_text("", 1), Some(""));
    }
}
