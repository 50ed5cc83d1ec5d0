//! Source positions.

use std::fmt;

/// Location of a token in the source text.
///
/// `line` is 1-based, `column` is 0-based and counted in characters,
/// `offset` is the byte offset from the start of the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    /// Start of the source.
    pub const START: Position = Position {
        line: 1,
        column: 0,
        offset: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// Advance past one character.
    ///
    /// A newline moves to column 0 of the next line.
    #[inline]
    #[must_use]
    pub fn advance(self, c: char) -> Self {
        let offset = self.offset + c.len_utf8() as u32;
        if c == '\n' {
            Position {
                line: self.line + 1,
                column: 0,
                offset,
            }
        } else {
            Position {
                line: self.line,
                column: self.column + 1,
                offset,
            }
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
