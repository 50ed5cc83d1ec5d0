//! Parse error type.
//!
//! A [`ParseError`] is a positioned record: code, message, the offending
//! token and, for unclosed delimiters, where the delimiter was opened. The
//! parser collects them rather than stopping at the first one.

use std::fmt;

use wisp_diagnostic::{Diagnostic, ErrorCode};
use wisp_ir::{Position, Token, TokenKind};
use wisp_lexer::LexError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub pos: Position,
    /// The token the parser was looking at, if any.
    pub token: Option<Token>,
    /// Secondary location, such as the opening delimiter.
    pub related: Option<(Position, String)>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, pos: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            pos,
            token: None,
            related: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: &Token) -> Self {
        self.token = Some(token.clone());
        self
    }

    #[must_use]
    pub fn with_related(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.related = Some((pos, message.into()));
        self
    }

    /// `expected X, found Y`.
    #[cold]
    pub fn expected_token(expected: TokenKind, found: &Token) -> Self {
        let code = if found.kind == TokenKind::Eof {
            ErrorCode::E1003
        } else {
            ErrorCode::E1001
        };
        ParseError::new(
            code,
            format!("expected {}, found {}", expected.display_name(), found),
            found.pos,
        )
        .with_token(found)
    }

    /// A token that has no prefix handler.
    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {found}"),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn invalid_character(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E0002,
            format!("invalid character `{}`", found.literal),
            found.pos,
        )
        .with_token(found)
    }

    /// Inside a delimited list: neither `,` nor the closing delimiter.
    #[cold]
    pub fn expected_separator(close: TokenKind, found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected `,` or {}, found {}", close.display_name(), found),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn expected_identifier(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1004,
            format!("expected identifier, found {found}"),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn missing_terminator(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1009,
            format!("expected `;` after statement, found {found}"),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn unclosed_delimiter(open: &Token, found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed {}: reached {}", open.kind.display_name(), found),
            found.pos,
        )
        .with_token(found)
        .with_related(open.pos, "opened here")
    }

    #[cold]
    pub fn invalid_assignment_target(pos: Position) -> Self {
        ParseError::new(ErrorCode::E1005, "invalid assignment target", pos)
    }

    #[cold]
    pub fn loop_control_outside_loop(token: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1010,
            format!("{} outside of a loop", token.kind.display_name()),
            token.pos,
        )
        .with_token(token)
    }

    #[cold]
    pub fn duplicate_parameter(token: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("duplicate parameter `{}`", token.literal),
            token.pos,
        )
        .with_token(token)
    }

    #[cold]
    pub fn invalid_class_member(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1007,
            format!("expected method definition in class body, found {found}"),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn invalid_super(found: &Token) -> Self {
        ParseError::new(
            ErrorCode::E1008,
            format!("expected `(` or `.` after `super`, found {found}"),
            found.pos,
        )
        .with_token(found)
    }

    #[cold]
    pub fn invalid_number(token: &Token) -> Self {
        ParseError::new(
            ErrorCode::E0004,
            format!("number literal `{}` is out of range", token.literal),
            token.pos,
        )
        .with_token(token)
    }

    #[cold]
    pub fn from_lex(err: &LexError) -> Self {
        ParseError::new(err.code(), err.to_string(), err.pos)
    }

    /// Characters the caret should underline.
    fn width(&self) -> u32 {
        match &self.token {
            Some(token) if token.kind == TokenKind::Eof => 1,
            Some(token) => token.render().chars().count().max(1) as u32,
            None => 1,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = self.code.description();
        let mut diag = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_wide_label(self.pos, self.width(), label);
        if let Some((pos, message)) = &self.related {
            diag = diag.with_secondary_label(*pos, message.clone());
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.pos)
    }
}

impl std::error::Error for ParseError {}
