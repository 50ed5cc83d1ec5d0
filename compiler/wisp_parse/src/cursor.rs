//! Token cursor for navigating a token stream.
//!
//! Owns the tokens and guarantees an `Eof` token is always available, so
//! looking past the end is never out of bounds.

use wisp_ir::{Position, Token, TokenKind};

use crate::ParseError;

#[derive(Clone, Debug)]
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_pos = tokens.last().map_or(Position::START, |t| t.pos);
        let eof = tokens
            .iter()
            .rev()
            .find(|t| t.kind == TokenKind::Eof)
            .cloned()
            .unwrap_or_else(|| Token::eof(eof_pos));
        Cursor {
            tokens,
            pos: 0,
            eof,
        }
    }

    /// Index of the current token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// The token after the current one.
    #[inline]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos + 1).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Move past the current token and return it. Does not move past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report what was found instead.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected_token(kind, self.current()))
        }
    }

    /// Consume an identifier token.
    pub fn expect_ident(&mut self) -> Result<Token, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected_identifier(self.current()))
        }
    }
}
