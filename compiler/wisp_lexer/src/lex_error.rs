//! Lexer errors.
//!
//! Lexing stops at the first of these; illegal characters are not errors
//! but [`TokenKind::Illegal`](wisp_ir::TokenKind::Illegal) tokens.

use std::fmt;

use wisp_diagnostic::{Diagnostic, ErrorCode};
use wisp_ir::Position;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Where the unterminated construct starts.
    pub pos: Position,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// End of input before the closing `"`.
    UnterminatedString,
    /// End of input inside a `/* */` comment.
    UnterminatedComment,
}

impl LexError {
    #[cold]
    pub fn unterminated_string(pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            pos,
        }
    }

    #[cold]
    pub fn unterminated_comment(pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedComment,
            pos,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnterminatedComment => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::UnterminatedComment => "comment starts here",
        };
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_wide_label(self.pos, 2, label)
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string"),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
        }
    }
}

impl std::error::Error for LexError {}
