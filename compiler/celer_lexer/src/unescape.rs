//! String literal decoding.
//!
//! Lexemes keep their surrounding quotes and raw escapes; decoding happens
//! when the literal is evaluated.

/// Decode a string literal lexeme (quotes included) into its runtime text.
///
/// Recognized escapes are `\n`, `\t`, `\\` and `\"`. Any other escaped
/// character stands for itself (`\q` is `q`). A trailing lone backslash is
/// dropped.
///
/// ```
/// use celer_lexer::unescape_string_literal;
///
/// assert_eq!(unescape_string_literal(r#""a\tb""#), "a\tb");
/// assert_eq!(unescape_string_literal(r#""\q""#), "q");
/// ```
pub fn unescape_string_literal(lexeme: &str) -> String {
    let inner = strip_quotes(lexeme);
    if !inner.contains('\\') {
        return inner.to_string();
    }

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => {}
        }
    }
    result
}

fn strip_quotes(lexeme: &str) -> &str {
    let inner = lexeme.strip_prefix('"').unwrap_or(lexeme);
    inner.strip_suffix('"').unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain() {
        assert_eq!(unescape_string_literal("\"hello\""), "hello");
        assert_eq!(unescape_string_literal("\"\""), "");
    }

    #[test]
    fn test_known_escapes() {
        assert_eq!(unescape_string_literal(r#""a\nb""#), "a\nb");
        assert_eq!(unescape_string_literal(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(unescape_string_literal(r#""back\\slash""#), "back\\slash");
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        assert_eq!(unescape_string_literal(r#""\r\0""#), "r0");
    }

    #[test]
    fn test_multibyte() {
        assert_eq!(unescape_string_literal("\"héllo\\n\""), "héllo\n");
    }
}
