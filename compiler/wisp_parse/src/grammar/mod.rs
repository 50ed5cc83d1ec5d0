//! Grammar productions, split by syntactic category.

pub(crate) mod expr;
mod list;
mod stmt;
