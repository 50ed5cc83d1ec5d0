//! Expression parsing.
//!
//! The loop below is the whole of the Pratt algorithm: run the prefix
//! handler for the current token, then keep handing the result to infix
//! handlers while they bind tighter than the caller's minimum.

pub(crate) mod infix;
pub(crate) mod primary;

use wisp_ir::ast::Expr;
use wisp_stack::ensure_sufficient_stack;

use crate::{PResult, ParseError, Parser, Precedence};

impl Parser<'_> {
    /// Parse an expression whose operators all bind tighter than `min`.
    pub fn parse_expression(&mut self, min: Precedence) -> PResult<Expr> {
        ensure_sufficient_stack(|| self.parse_expression_inner(min))
    }

    fn parse_expression_inner(&mut self, min: Precedence) -> PResult<Expr> {
        let kind = self.cursor.current_kind();
        let Some(prefix) = self.rules.prefix(kind) else {
            return Err(ParseError::expected_expression(self.cursor.current()));
        };
        let mut left = prefix(self)?;

        while let Some(rule) = self.rules.infix(self.cursor.current_kind()) {
            if rule.precedence <= min {
                break;
            }
            left = (rule.handler)(self, left)?;
        }
        Ok(left)
    }
}
