//! Error recovery.
//!
//! After a statement fails to parse, the parser skips ahead to a point where
//! the next statement can start cleanly: just past a `;`, at a keyword that
//! begins a statement, at a `}` closing the enclosing block, or at end of
//! input. Membership uses a bitset over token kind discriminants.

use wisp_ir::TokenKind;

use crate::cursor::Cursor;

/// A set of token kinds, one bit per discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.index())) != 0
    }
}

/// Keywords that begin a statement.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Let)
    .with(TokenKind::Const)
    .with(TokenKind::Fn)
    .with(TokenKind::Class)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Return)
    .with(TokenKind::Break)
    .with(TokenKind::Continue);

/// Where recovery between top-level statements stops. A stray `}` is
/// skipped here since there is no block for it to close.
pub const TOP_LEVEL_RECOVERY: TokenSet = STMT_START.with(TokenKind::Eof);

/// Where recovery inside a block stops (the `;` case is handled separately).
pub const BLOCK_RECOVERY: TokenSet = STMT_START.union(BLOCK_END);

/// Tokens that close the enclosing construct.
const BLOCK_END: TokenSet = TokenSet::new()
    .with(TokenKind::RBrace)
    .with(TokenKind::Eof);

/// Where recovery inside a class body stops.
pub const CLASS_MEMBER_RECOVERY: TokenSet = BLOCK_END.with(TokenKind::Fn);

/// Skip tokens until one in `recovery` is current. A `;` met on the way is
/// consumed and ends the skip.
///
/// Returns the number of tokens skipped.
pub fn synchronize(cursor: &mut Cursor, recovery: TokenSet) -> usize {
    let mut skipped = 0;
    while !cursor.is_at_end() {
        let kind = cursor.current_kind();
        if recovery.contains(kind) {
            break;
        }
        cursor.advance();
        skipped += 1;
        if kind == TokenKind::Semicolon {
            break;
        }
    }
    skipped
}
