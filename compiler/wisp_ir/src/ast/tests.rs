use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{Position, StringInterner};

fn at(line: u32, column: u32) -> Position {
    Position::new(line, column, 0)
}

#[test]
fn only_names_indexes_and_properties_are_assignable() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let ident = Expr::new(ExprKind::Ident(x), at(1, 0));
    let index = Expr::new(
        ExprKind::Index {
            target: Box::new(ident.clone()),
            index: Box::new(Expr::new(ExprKind::Int(0), at(1, 2))),
        },
        at(1, 1),
    );
    let property = Expr::new(
        ExprKind::Property {
            object: Box::new(Expr::new(ExprKind::This, at(1, 0))),
            name: x,
        },
        at(1, 4),
    );
    let call = Expr::new(
        ExprKind::Call {
            callee: Box::new(ident.clone()),
            args: vec![],
        },
        at(1, 1),
    );

    assert!(ident.is_assignable());
    assert!(index.is_assignable());
    assert!(property.is_assignable());
    assert!(!call.is_assignable());
    assert!(!Expr::new(ExprKind::Int(1), at(1, 0)).is_assignable());
}

#[test]
fn function_literal_shares_its_body() {
    let interner = StringInterner::new();
    let literal = Rc::new(FunctionLiteral {
        name: Some(interner.intern("add")),
        params: vec![interner.intern("a"), interner.intern("b")],
        body: Block::default(),
        pos: at(1, 0),
    });
    let expr = Expr::new(ExprKind::Function(Rc::clone(&literal)), at(1, 0));

    assert_eq!(literal.arity(), 2);
    assert_eq!(Rc::strong_count(&literal), 2);
    assert_eq!(expr.kind, ExprKind::Function(literal));
}

#[test]
fn operator_symbols() {
    assert_eq!(BinaryOp::Mod.as_symbol(), "%");
    assert_eq!(BinaryOp::GtEq.to_string(), ">=");
    assert_eq!(LogicalOp::Or.as_symbol(), "||");
    assert_eq!(UnaryOp::Not.to_string(), "!");
    assert!(BinaryOp::NotEq.is_comparison());
    assert!(!BinaryOp::Div.is_comparison());
}
