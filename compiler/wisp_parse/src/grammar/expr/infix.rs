//! Infix handlers. Each is entered with the operator as the current token
//! and the already-parsed left operand.

use wisp_ir::ast::{BinaryOp, Expr, ExprKind, LogicalOp};
use wisp_ir::TokenKind;

use crate::{PResult, ParseError, Parser, Precedence};

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus | TokenKind::PlusAssign => BinaryOp::Add,
        TokenKind::Minus | TokenKind::MinusAssign => BinaryOp::Sub,
        TokenKind::Star | TokenKind::StarAssign => BinaryOp::Mul,
        TokenKind::Slash | TokenKind::SlashAssign => BinaryOp::Div,
        TokenKind::Percent | TokenKind::PercentAssign => BinaryOp::Mod,
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        _ => return None,
    })
}

/// Left-associative arithmetic and comparison.
pub(crate) fn binary(p: &mut Parser<'_>, left: Expr) -> PResult<Expr> {
    let operator = p.cursor.advance();
    let Some(op) = binary_op(operator.kind) else {
        return Err(ParseError::expected_expression(&operator));
    };
    let right = p.parse_expression(p.rules.precedence(operator.kind))?;
    Ok(Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        operator.pos,
    ))
}

/// `&&` and `||`; kept apart from [`binary`] because they short-circuit.
pub(crate) fn logical(p: &mut Parser<'_>, left: Expr) -> PResult<Expr> {
    let operator = p.cursor.advance();
    let op = if operator.kind == TokenKind::AndAnd {
        LogicalOp::And
    } else {
        LogicalOp::Or
    };
    let right = p.parse_expression(p.rules.precedence(operator.kind))?;
    Ok(Expr::new(
        ExprKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        operator.pos,
    ))
}

/// `=` and the compound forms. Right-associative.
pub(crate) fn assign(p: &mut Parser<'_>, target: Expr) -> PResult<Expr> {
    let operator = p.cursor.advance();
    if !target.is_assignable() {
        return Err(ParseError::invalid_assignment_target(target.pos).with_token(&operator));
    }
    let op = if operator.kind == TokenKind::Assign {
        None
    } else {
        binary_op(operator.kind)
    };
    let value = p.parse_expression(Precedence::Lowest)?;
    Ok(Expr::new(
        ExprKind::Assign {
            target: Box::new(target),
            op,
            value: Box::new(value),
        },
        operator.pos,
    ))
}

pub(crate) fn call(p: &mut Parser<'_>, callee: Expr) -> PResult<Expr> {
    let open = p.cursor.advance();
    let args = p.parse_delimited_list(&open, TokenKind::RParen, |p| {
        p.parse_expression(Precedence::Lowest)
    })?;
    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(callee),
            args,
        },
        open.pos,
    ))
}

pub(crate) fn index(p: &mut Parser<'_>, target: Expr) -> PResult<Expr> {
    let open = p.cursor.advance();
    let index = p.parse_expression(Precedence::Lowest)?;
    p.expect_closing(&open, TokenKind::RBracket)?;
    Ok(Expr::new(
        ExprKind::Index {
            target: Box::new(target),
            index: Box::new(index),
        },
        open.pos,
    ))
}

/// `object.name`
pub(crate) fn property(p: &mut Parser<'_>, object: Expr) -> PResult<Expr> {
    p.cursor.advance();
    let name = p.cursor.expect_ident()?;
    Ok(Expr::new(
        ExprKind::Property {
            object: Box::new(object),
            name: p.intern(&name.literal),
        },
        name.pos,
    ))
}
