use std::fmt;

use celer_ir::{Position, Span};

use crate::ErrorCode;

/// A labeled source location with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub pos: Position,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, pos: Position, message: impl Into<String>) -> Self {
        Label {
            span,
            pos,
            message: message.into(),
        }
    }
}

/// A syntax or lexical error with everything needed to render it.
///
/// Celer has no warnings: every diagnostic is an error that stops the
/// program from running.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Labeled locations showing where the error occurred.
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a label at the error location.
    pub fn with_label(mut self, span: Span, pos: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, pos, message));
        self
    }

    /// Position of the first label.
    pub fn primary_pos(&self) -> Option<Position> {
        self.labels.first().map(|l| l.pos)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.message)?;
        for label in &self.labels {
            write!(f, "\n  --> {}: {}", label.pos, label.message)?;
        }
        Ok(())
    }
}
