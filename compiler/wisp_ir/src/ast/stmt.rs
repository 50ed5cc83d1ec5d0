//! Statement nodes.

use std::rc::Rc;

use super::expr::{Expr, FunctionLiteral};
use crate::{Name, Position};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value;`, `value` is `None` for a bare `let name;`.
    Let {
        name: Name,
        value: Option<Expr>,
    },
    Const {
        name: Name,
        value: Expr,
    },
    Return(Option<Expr>),
    Expression(Expr),
    Block(Block),
    /// `if c {..} elif c {..} else {..}`
    If {
        branches: Vec<IfBranch>,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    /// `for (init; cond; step) body`; every header part is optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Block,
    },
    Break,
    Continue,
    Class(ClassDecl),
    /// Named declaration `fn name(...) {...}`.
    Function(Rc<FunctionLiteral>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfBranch {
    pub cond: Expr,
    pub body: Block,
}

/// `{ stmts }`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

/// `class Name extends Parent { fn method(...) {...} ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Name,
    pub parent: Option<ParentRef>,
    pub methods: Vec<Rc<FunctionLiteral>>,
}

/// Parent named in an `extends` clause.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParentRef {
    pub name: Name,
    pub pos: Position,
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
