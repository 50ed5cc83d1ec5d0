//! Statement parsing.

use std::rc::Rc;

use wisp_ir::ast::{
    Block, ClassDecl, Expr, FunctionLiteral, IfBranch, ParentRef, Stmt, StmtKind,
};
use wisp_ir::TokenKind;
use wisp_stack::ensure_sufficient_stack;

use crate::recovery::{BLOCK_RECOVERY, CLASS_MEMBER_RECOVERY};
use crate::{PResult, ParseError, Parser, Precedence};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> PResult<Stmt> {
        match self.cursor.current_kind() {
            TokenKind::Let => {
                let stmt = self.parse_let()?;
                self.expect_terminator()?;
                Ok(stmt)
            }
            TokenKind::Const => self.parse_const(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Break | TokenKind::Continue => self.parse_loop_control(),
            TokenKind::Class => self.parse_class(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let pos = block.pos;
                Ok(Stmt::new(StmtKind::Block(block), pos))
            }
            TokenKind::Fn if self.cursor.peek_kind() == TokenKind::Ident => {
                let keyword = self.cursor.advance();
                let name = self.cursor.advance();
                let name = self.intern(&name.literal);
                let literal = self.parse_function_tail(Some(name), keyword.pos)?;
                Ok(Stmt::new(StmtKind::Function(literal), keyword.pos))
            }
            _ => {
                // Infix expressions sit at their operator; the statement
                // starts at its first token.
                let pos = self.cursor.current().pos;
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect_terminator()?;
                Ok(Stmt::new(StmtKind::Expression(expr), pos))
            }
        }
    }

    /// `{ stmts }`. Errors inside are recorded and recovered from locally so
    /// one bad statement does not discard the whole block.
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::unclosed_delimiter(&open, self.cursor.current()));
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                _ => {
                    let start = self.cursor.position();
                    match self.parse_statement() {
                        Ok(stmt) => stmts.push(stmt),
                        Err(err) => {
                            self.record_error(err);
                            self.recover(start, BLOCK_RECOVERY);
                        }
                    }
                }
            }
        }
        Ok(Block {
            stmts,
            pos: open.pos,
        })
    }

    /// A statement ends at `;`; it may be left off before `}` or end of input.
    fn expect_terminator(&mut self) -> PResult<()> {
        match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::RBrace | TokenKind::Eof => Ok(()),
            _ => Err(ParseError::missing_terminator(self.cursor.current())),
        }
    }

    /// `let name` or `let name = value`, without the terminator.
    fn parse_let(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let name = self.cursor.expect_ident()?;
        let name = self.intern(&name.literal);
        let value = if self.cursor.eat(TokenKind::Assign) {
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };
        Ok(Stmt::new(StmtKind::Let { name, value }, keyword.pos))
    }

    fn parse_const(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let name = self.cursor.expect_ident()?;
        let name = self.intern(&name.literal);
        self.cursor.expect(TokenKind::Assign)?;
        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_terminator()?;
        Ok(Stmt::new(StmtKind::Const { name, value }, keyword.pos))
    }

    fn parse_return(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let value = match self.cursor.current_kind() {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expression(Precedence::Lowest)?),
        };
        self.expect_terminator()?;
        Ok(Stmt::new(StmtKind::Return(value), keyword.pos))
    }

    /// `if c {..} elif c {..} else if c {..} else {..}`
    fn parse_if(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let mut branches = vec![self.parse_if_branch()?];
        let mut else_block = None;
        loop {
            if self.cursor.eat(TokenKind::Elif) {
                branches.push(self.parse_if_branch()?);
            } else if self.cursor.eat(TokenKind::Else) {
                if self.cursor.eat(TokenKind::If) {
                    branches.push(self.parse_if_branch()?);
                } else {
                    else_block = Some(self.parse_block()?);
                    break;
                }
            } else {
                break;
            }
        }
        Ok(Stmt::new(
            StmtKind::If {
                branches,
                else_block,
            },
            keyword.pos,
        ))
    }

    fn parse_if_branch(&mut self) -> PResult<IfBranch> {
        let cond = self.parse_expression(Precedence::Lowest)?;
        let body = self.parse_block()?;
        Ok(IfBranch { cond, body })
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let cond = self.parse_expression(Precedence::Lowest)?;
        let body = self.parse_loop_body()?;
        Ok(Stmt::new(StmtKind::While { cond, body }, keyword.pos))
    }

    /// `for (init; cond; step) { body }`
    fn parse_for(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let open = self.cursor.expect(TokenKind::LParen)?;

        let init = match self.cursor.current_kind() {
            TokenKind::Semicolon => None,
            TokenKind::Let => Some(Box::new(self.parse_let()?)),
            _ => {
                let expr = self.parse_expression(Precedence::Lowest)?;
                let pos = expr.pos;
                Some(Box::new(Stmt::new(StmtKind::Expression(expr), pos)))
            }
        };
        self.cursor.expect(TokenKind::Semicolon)?;

        let cond = self.parse_optional_expression(TokenKind::Semicolon)?;
        self.cursor.expect(TokenKind::Semicolon)?;

        let step = self.parse_optional_expression(TokenKind::RParen)?;
        self.expect_closing(&open, TokenKind::RParen)?;

        let body = self.parse_loop_body()?;
        Ok(Stmt::new(
            StmtKind::For {
                init,
                cond,
                step,
                body,
            },
            keyword.pos,
        ))
    }

    fn parse_optional_expression(&mut self, end: TokenKind) -> PResult<Option<Expr>> {
        if self.cursor.check(end) {
            Ok(None)
        } else {
            self.parse_expression(Precedence::Lowest).map(Some)
        }
    }

    fn parse_loop_body(&mut self) -> PResult<Block> {
        self.loop_depth += 1;
        let body = self.parse_block();
        self.loop_depth -= 1;
        body
    }

    fn parse_loop_control(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        if self.loop_depth == 0 {
            return Err(ParseError::loop_control_outside_loop(&keyword));
        }
        self.expect_terminator()?;
        let kind = if keyword.kind == TokenKind::Break {
            StmtKind::Break
        } else {
            StmtKind::Continue
        };
        Ok(Stmt::new(kind, keyword.pos))
    }

    /// `class Name (extends Parent)? { fn method(...) {...} ... }`
    fn parse_class(&mut self) -> PResult<Stmt> {
        let keyword = self.cursor.advance();
        let name = self.cursor.expect_ident()?;
        let name = self.intern(&name.literal);
        let parent = if self.cursor.eat(TokenKind::Extends) {
            let parent = self.cursor.expect_ident()?;
            Some(ParentRef {
                name: self.intern(&parent.literal),
                pos: parent.pos,
            })
        } else {
            None
        };

        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut methods = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::unclosed_delimiter(&open, self.cursor.current()));
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                TokenKind::Fn => {
                    let start = self.cursor.position();
                    match self.parse_method() {
                        Ok(method) => methods.push(method),
                        Err(err) => {
                            self.record_error(err);
                            self.recover_class_member(start);
                        }
                    }
                }
                _ => {
                    let start = self.cursor.position();
                    let err = ParseError::invalid_class_member(self.cursor.current());
                    self.record_error(err);
                    self.recover_class_member(start);
                }
            }
        }

        Ok(Stmt::new(
            StmtKind::Class(ClassDecl {
                name,
                parent,
                methods,
            }),
            keyword.pos,
        ))
    }

    fn parse_method(&mut self) -> PResult<Rc<FunctionLiteral>> {
        let keyword = self.cursor.advance();
        let name = self.cursor.expect_ident()?;
        let name = self.intern(&name.literal);
        self.parse_function_tail(Some(name), keyword.pos)
    }

    fn recover_class_member(&mut self, start: usize) {
        self.recover(start, CLASS_MEMBER_RECOVERY);
    }
}
