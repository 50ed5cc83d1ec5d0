//! Prefix handlers: literals, groups, unary operators and the keyword
//! expressions (`fn`, `this`, `super`, `new`).

use std::rc::Rc;

use wisp_ir::ast::{Expr, ExprKind, FunctionLiteral, UnaryOp};
use wisp_ir::{Name, Position, TokenKind};

use crate::{PResult, ParseError, Parser, Precedence};

pub(crate) fn identifier(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    Ok(Expr::new(ExprKind::Ident(p.intern(&token.literal)), token.pos))
}

pub(crate) fn integer(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    let value = token
        .literal
        .parse::<i64>()
        .map_err(|_| ParseError::invalid_number(&token))?;
    Ok(Expr::new(ExprKind::Int(value), token.pos))
}

pub(crate) fn float(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    let value = token
        .literal
        .parse::<f64>()
        .map_err(|_| ParseError::invalid_number(&token))?;
    Ok(Expr::new(ExprKind::Float(value), token.pos))
}

pub(crate) fn string(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    Ok(Expr::new(ExprKind::Str(Rc::from(token.literal.as_str())), token.pos))
}

pub(crate) fn boolean(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    let value = token.kind == TokenKind::True;
    Ok(Expr::new(ExprKind::Bool(value), token.pos))
}

pub(crate) fn null(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    Ok(Expr::new(ExprKind::Null, token.pos))
}

/// `-x` and `!x`.
pub(crate) fn unary(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    let op = if token.kind == TokenKind::Minus {
        UnaryOp::Neg
    } else {
        UnaryOp::Not
    };
    let operand = p.parse_expression(Precedence::Prefix)?;
    Ok(Expr::new(
        ExprKind::Prefix {
            op,
            operand: Box::new(operand),
        },
        token.pos,
    ))
}

/// `( expr )`; the parentheses leave no trace in the tree.
pub(crate) fn group(p: &mut Parser<'_>) -> PResult<Expr> {
    let open = p.cursor.advance();
    let inner = p.parse_expression(Precedence::Lowest)?;
    p.expect_closing(&open, TokenKind::RParen)?;
    Ok(inner)
}

pub(crate) fn array(p: &mut Parser<'_>) -> PResult<Expr> {
    let open = p.cursor.advance();
    let items = p.parse_delimited_list(&open, TokenKind::RBracket, |p| {
        p.parse_expression(Precedence::Lowest)
    })?;
    Ok(Expr::new(ExprKind::Array(items), open.pos))
}

/// `{ key: value, ... }` in expression position.
pub(crate) fn hash(p: &mut Parser<'_>) -> PResult<Expr> {
    let open = p.cursor.advance();
    let pairs = p.parse_delimited_list(&open, TokenKind::RBrace, |p| {
        let key = p.parse_expression(Precedence::Lowest)?;
        p.cursor.expect(TokenKind::Colon)?;
        let value = p.parse_expression(Precedence::Lowest)?;
        Ok((key, value))
    })?;
    Ok(Expr::new(ExprKind::Hash(pairs), open.pos))
}

/// `fn (params) { body }`, optionally named.
pub(crate) fn function(p: &mut Parser<'_>) -> PResult<Expr> {
    let keyword = p.cursor.advance();
    let name = if p.cursor.check(TokenKind::Ident) {
        let token = p.cursor.advance();
        Some(p.intern(&token.literal))
    } else {
        None
    };
    let literal = p.parse_function_tail(name, keyword.pos)?;
    Ok(Expr::new(ExprKind::Function(literal), keyword.pos))
}

pub(crate) fn this(p: &mut Parser<'_>) -> PResult<Expr> {
    let token = p.cursor.advance();
    Ok(Expr::new(ExprKind::This, token.pos))
}

/// `super.method` or the callee half of `super(args)`.
pub(crate) fn super_expr(p: &mut Parser<'_>) -> PResult<Expr> {
    let keyword = p.cursor.advance();
    let method = if p.cursor.eat(TokenKind::Dot) {
        let name = p.cursor.expect_ident()?;
        Some(p.intern(&name.literal))
    } else if p.cursor.check(TokenKind::LParen) {
        None
    } else {
        return Err(ParseError::invalid_super(p.cursor.current()));
    };
    Ok(Expr::new(ExprKind::Super { method }, keyword.pos))
}

/// `new Class` or `new Class(args)`.
pub(crate) fn new_instance(p: &mut Parser<'_>) -> PResult<Expr> {
    let keyword = p.cursor.advance();
    // Stop before `(` so the argument list belongs to `new`.
    let class = p.parse_expression(Precedence::Call)?;
    let args = if p.cursor.check(TokenKind::LParen) {
        let open = p.cursor.advance();
        p.parse_delimited_list(&open, TokenKind::RParen, |p| {
            p.parse_expression(Precedence::Lowest)
        })?
    } else {
        Vec::new()
    };
    Ok(Expr::new(
        ExprKind::New {
            class: Box::new(class),
            args,
        },
        keyword.pos,
    ))
}

/// Characters the lexer could not classify.
pub(crate) fn illegal(p: &mut Parser<'_>) -> PResult<Expr> {
    Err(ParseError::invalid_character(p.cursor.current()))
}

impl Parser<'_> {
    /// `(params) { body }` of a function or method.
    pub(crate) fn parse_function_tail(
        &mut self,
        name: Option<Name>,
        pos: Position,
    ) -> PResult<Rc<FunctionLiteral>> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let tokens =
            self.parse_delimited_list(&open, TokenKind::RParen, |p| p.cursor.expect_ident())?;

        let mut params: Vec<Name> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let param = self.intern(&token.literal);
            if params.contains(&param) {
                // The rest of the definition is still well formed.
                self.record_error(ParseError::duplicate_parameter(token));
                continue;
            }
            params.push(param);
        }

        // Loops outside the function do not enclose its body.
        let outer_depth = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.parse_block();
        self.loop_depth = outer_depth;

        Ok(Rc::new(FunctionLiteral {
            name,
            params,
            body: body?,
            pos,
        }))
    }
}
