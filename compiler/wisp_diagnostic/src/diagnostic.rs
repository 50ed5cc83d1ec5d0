//! Core diagnostic types.

use std::fmt;

use wisp_ir::Position;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A position in the source with a message attached.
///
/// `width` is the number of characters the caret underline covers.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub pos: Position,
    pub width: u32,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(pos: Position, width: u32, message: impl Into<String>) -> Self {
        Label {
            pos,
            width: width.max(1),
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(pos: Position, width: u32, message: impl Into<String>) -> Self {
        Label {
            pos,
            width: width.max(1),
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A reportable problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a one-character primary label.
    pub fn with_label(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(pos, 1, message));
        self
    }

    /// Add a primary label underlining `width` characters.
    pub fn with_wide_label(mut self, pos: Position, width: u32, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(pos, width, message));
        self
    }

    pub fn with_secondary_label(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(pos, 1, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Position of the first primary label.
    pub fn primary_pos(&self) -> Option<Position> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.pos)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(pos) = self.primary_pos() {
            write!(f, " at {pos}")?;
        }
        Ok(())
    }
}
