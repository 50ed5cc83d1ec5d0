//! Syntax tree.
//!
//! A strict tree: every node owns its children and records the [`Position`]
//! of the token it was parsed from, which anchors runtime errors. The parser
//! builds it once and nothing mutates it afterwards. Function literals sit
//! behind `Rc` so that runtime function values can point at their body
//! without copying it.
//!
//! [`Position`]: crate::Position

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, FunctionLiteral};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use stmt::{Block, ClassDecl, IfBranch, ParentRef, Program, Stmt, StmtKind};

#[cfg(test)]
mod tests;
