//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::Write;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Source text attached to an emitter for snippet rendering.
struct SourceContext {
    text: String,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceContext>,
    file_path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is consulted only for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Attach source text so labels render with a snippet and caret.
    #[must_use]
    pub fn with_source(mut self, text: &str) -> Self {
        self.source = Some(SourceContext {
            lines: LineOffsetTable::build(text),
            text: text.to_string(),
        });
        self
    }

    /// Attach a file path shown in `--> path:line:col` markers.
    #[must_use]
    pub fn with_file_path(mut self, path: &str) -> Self {
        self.file_path = Some(path.to_string());
        self
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, " {}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, " [{code}]");
        }
    }

    fn write_label(&mut self, label: &Label) {
        let _ = write!(self.writer, "  --> ");
        if let Some(path) = &self.file_path {
            let _ = write!(self.writer, "{path}:");
        }
        let _ = writeln!(self.writer, "{}", label.pos);

        let snippet = self.source.as_ref().and_then(|src| {
            src.lines
                .line_text(&src.text, label.pos.line as usize)
                .map(str::to_string)
        });
        let Some(line_text) = snippet else {
            let _ = write!(self.writer, "      ");
            self.write_colored(&label.message, colors::ERROR);
            let _ = writeln!(self.writer);
            return;
        };

        let gutter = label.pos.line.to_string();
        let pad = " ".repeat(gutter.len());
        let _ = writeln!(self.writer, "   {pad} |");
        let _ = writeln!(self.writer, "   {gutter} | {line_text}");

        let column = (label.pos.column as usize).saturating_sub(1);
        let room = line_text.len().saturating_sub(column).max(1);
        let width = (label.span.len() as usize).clamp(1, room);
        let _ = write!(self.writer, "   {pad} | {}", " ".repeat(column));
        self.write_colored(&"^".repeat(width), colors::ERROR);
        let _ = write!(self.writer, " ");
        self.write_colored(&label.message, colors::ERROR);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error [CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(
                self.writer,
                ": aborting due to {error_count} previous errors"
            );
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use celer_ir::{Position, Span};
    use pretty_assertions::assert_eq;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::error(ErrorCode::E1001)
            .with_message("expected ';' after expression")
            .with_label(Span::new(10, 11), Position::new(2, 6), "expected ';'")
    }

    fn render(emitter: TerminalEmitter<Vec<u8>>, diag: &Diagnostic) -> String {
        let mut emitter = emitter;
        emitter.emit(diag);
        emitter.flush();
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_terminal_emitter_no_color() {
        let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
        let text = render(emitter, &sample_diagnostic());
        assert!(text.starts_with("error [E1001]: expected ';' after expression\n"));
        assert!(text.contains("  --> 2:6\n"));
        assert!(text.contains("      expected ';'\n"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_terminal_emitter_with_color() {
        let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
        let text = render(emitter, &sample_diagnostic());
        assert!(text.contains("\x1b["));
        assert!(text.contains("E1001"));
    }

    #[test]
    fn test_auto_follows_tty() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }

    #[test]
    fn test_snippet_with_caret() {
        let source = "Function main() -> void {\n  x = 1\n}\n";
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("expected ';'")
            .with_label(Span::new(33, 34), Position::new(3, 1), "here");
        let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_source(source)
            .with_file_path("demo.celer");
        let text = render(emitter, &diag);
        assert_eq!(
            text,
            "error [E1001]: expected ';'\n  --> demo.celer:3:1\n     |\n   3 | }\n     | ^ here\n\n"
        );
    }

    #[test]
    fn test_summary() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(2);
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(text, "error: aborting due to 2 previous errors\n");
    }
}
