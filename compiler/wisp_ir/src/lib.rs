//! Shared front-end data for Wisp.
//!
//! Everything the lexer, parser and evaluator agree on lives here:
//!
//! - [`Position`]: line/column/offset of a token in the source
//! - [`Name`] and [`StringInterner`]: interned identifiers
//! - [`Token`], [`TokenKind`] and the keyword table
//! - [`ast`]: the immutable syntax tree produced by the parser

pub mod ast;
mod interner;
mod name;
mod position;
mod token;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use position::Position;
pub use token::{lookup_keyword, Token, TokenKind, KEYWORDS};
