//! Character cursor with position tracking.

use wisp_ir::Position;

/// Walks a source string one `char` at a time, keeping the line, column and
/// byte offset of the next unread character.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            pos: Position::START,
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.source.get(self.pos.offset as usize..).unwrap_or("")
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.rest().is_empty()
    }

    /// Next unread character.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after [`current`](Self::current).
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Consume one character.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos = self.pos.advance(c);
        Some(c)
    }

    /// Consume the current character if it is `expected`.
    #[inline]
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Source text between `start` and the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: Position) -> &'a str {
        self.source
            .get(start.offset as usize..self.pos.offset as usize)
            .unwrap_or("")
    }

    pub(crate) fn reset(&mut self) {
        self.pos = Position::START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_advances_position() {
        let mut cursor = Cursor::new("ab\nc");
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.bump(), Some('\n'));
        assert_eq!(cursor.pos(), Position::new(2, 0, 3));
        assert_eq!(cursor.current(), Some('c'));
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn eat_while_and_slice() {
        let mut cursor = Cursor::new("12345abc");
        let start = cursor.pos();
        cursor.eat_while(|c| c.is_ascii_digit());
        assert_eq!(cursor.slice_from(start), "12345");
        assert!(cursor.eat('a'));
        assert!(!cursor.eat('z'));
    }

    #[test]
    fn reset_returns_to_start() {
        let mut cursor = Cursor::new("xyz");
        cursor.bump();
        cursor.reset();
        assert_eq!(cursor.pos(), Position::START);
        assert!(!cursor.is_eof());
    }
}
