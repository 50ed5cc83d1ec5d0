//! Comma-separated lists.

use wisp_ir::{Token, TokenKind};

use crate::{PResult, ParseError, Parser};

impl Parser<'_> {
    /// Parse `item (, item)* ,? close` after the opening delimiter `open`
    /// has been consumed. A trailing comma is accepted.
    pub(crate) fn parse_delimited_list<T>(
        &mut self,
        open: &Token,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = Vec::new();
        loop {
            if self.cursor.eat(close) {
                return Ok(items);
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed_delimiter(open, self.cursor.current()));
            }
            items.push(item(self)?);
            if self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            if self.cursor.eat(close) {
                return Ok(items);
            }
            return Err(if self.cursor.is_at_end() {
                ParseError::unclosed_delimiter(open, self.cursor.current())
            } else {
                ParseError::expected_separator(close, self.cursor.current())
            });
        }
    }

    /// Consume `close` after a single inner item, reporting an unclosed
    /// `open` at end of input.
    pub(crate) fn expect_closing(&mut self, open: &Token, close: TokenKind) -> PResult<Token> {
        if self.cursor.is_at_end() {
            return Err(ParseError::unclosed_delimiter(open, self.cursor.current()));
        }
        self.cursor.expect(close)
    }
}
