//! Expression nodes.

use std::rc::Rc;

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use super::stmt::Block;
use crate::{Name, Position};

/// An expression and the position of the token that introduced it.
///
/// Prefix forms sit at their first token. Infix and postfix forms sit at
/// their operator: `+`, `and` or `=` for binary, logical and assignment
/// nodes, `[` for an index, `(` for a call and the property name for `.`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident(_) | ExprKind::Index { .. } | ExprKind::Property { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(Name),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Null,

    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `{k: v, ...}`, in source order.
    Hash(Vec<(Expr, Expr)>),

    Prefix {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `target[index]`
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// `callee(args...)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `target = value`, or `target op= value` when `op` is set.
    Assign {
        target: Box<Expr>,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    /// `object.name`
    Property {
        object: Box<Expr>,
        name: Name,
    },
    /// `new Class(args...)`
    New {
        class: Box<Expr>,
        args: Vec<Expr>,
    },
    This,
    /// `super(...)` when `method` is `None`, `super.method` otherwise.
    Super {
        method: Option<Name>,
    },
    Function(Rc<FunctionLiteral>),
}

/// `fn name(params) { body }`; `name` is absent for anonymous literals.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: Block,
    pub pos: Position,
}

impl FunctionLiteral {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
