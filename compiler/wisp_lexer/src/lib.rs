//! Lexer for Wisp.
//!
//! A single-pass scanner with one character of lookahead. [`Lexer::next_token`]
//! hands out one token per call; [`Lexer::tokenize_all`] drains the source into
//! an `Eof`-terminated vector and rewinds, so the same lexer can be drained
//! again.
//!
//! Unrecognized characters become [`TokenKind::Illegal`] tokens and scanning
//! carries on. Only an unterminated string or block comment stops the scan,
//! as a [`LexError`].

mod cursor;
mod lex_error;

use tracing::trace;
use wisp_ir::{lookup_keyword, Position, Token, TokenKind};

use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Rewind to the start of the source.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// Position of the next unread character.
    pub fn pos(&self) -> Position {
        self.cursor.pos()
    }

    /// Lex every token up to and including `Eof`, then rewind.
    ///
    /// The lexer is rewound on failure too.
    pub fn tokenize_all(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let result = loop {
            match self.next_token() {
                Ok(token) => {
                    let done = token.kind == TokenKind::Eof;
                    tokens.push(token);
                    if done {
                        break Ok(tokens);
                    }
                }
                Err(err) => break Err(err),
            }
        };
        self.reset();
        result
    }

    /// Lex the next token. Past the end this keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.cursor.pos();
        let Some(c) = self.cursor.bump() else {
            return Ok(Token::eof(start));
        };

        let token = match c {
            '"' => self.string(start)?,
            c if c.is_ascii_digit() => self.number(start),
            '.' if self.cursor.current().is_some_and(|n| n.is_ascii_digit()) => {
                self.number(start)
            }
            c if is_ident_start(c) => self.ident(start),
            _ => {
                let kind = self.operator(c);
                Token::new(kind, self.cursor.slice_from(start), start)
            }
        };

        trace!(kind = ?token.kind, pos = %token.pos, "token");
        Ok(token)
    }

    /// Skip whitespace, `//` comments and nested `/* */` comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.cursor.current(), self.cursor.peek()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.cursor.bump();
                }
                (Some('/'), Some('/')) => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => self.block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn block_comment(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        self.cursor.bump();
        self.cursor.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match (self.cursor.current(), self.cursor.peek()) {
                (None, _) => return Err(LexError::unterminated_comment(start)),
                (Some('/'), Some('*')) => {
                    self.cursor.bump();
                    self.cursor.bump();
                    depth += 1;
                }
                (Some('*'), Some('/')) => {
                    self.cursor.bump();
                    self.cursor.bump();
                    depth -= 1;
                }
                _ => {
                    self.cursor.bump();
                }
            }
        }
        Ok(())
    }

    /// Operators and delimiters. The opening character is already consumed.
    fn operator(&mut self, c: char) -> TokenKind {
        // Two-character forms that share a first character.
        let mut pair = |second: char, double: TokenKind, single: TokenKind| {
            if self.cursor.eat(second) {
                double
            } else {
                single
            }
        };
        match c {
            '=' => pair('=', TokenKind::Eq, TokenKind::Assign),
            '!' => pair('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => pair('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => pair('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => pair('&', TokenKind::AndAnd, TokenKind::Amp),
            '|' => pair('|', TokenKind::OrOr, TokenKind::Pipe),
            '+' => pair('=', TokenKind::PlusAssign, TokenKind::Plus),
            '-' => pair('=', TokenKind::MinusAssign, TokenKind::Minus),
            '*' => pair('=', TokenKind::StarAssign, TokenKind::Star),
            '/' => pair('=', TokenKind::SlashAssign, TokenKind::Slash),
            '%' => pair('=', TokenKind::PercentAssign, TokenKind::Percent),
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            _ => TokenKind::Illegal,
        }
    }

    /// `"..."` with escapes decoded. The opening quote is already consumed.
    fn string(&mut self, start: Position) -> Result<Token, LexError> {
        let mut value = String::new();
        loop {
            let Some(c) = self.cursor.bump() else {
                return Err(LexError::unterminated_string(start));
            };
            match c {
                '"' => break,
                '\\' => {
                    let Some(escaped) = self.cursor.bump() else {
                        return Err(LexError::unterminated_string(start));
                    };
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '0' => value.push('\0'),
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '\'' => value.push('\''),
                        // Unknown escapes are kept verbatim.
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                }
                other => value.push(other),
            }
        }
        Ok(Token::new(TokenKind::Str, value, start))
    }

    /// Integer or float. The first character (digit or `.`) is consumed.
    ///
    /// `.5` and `5.` are floats. A `.` after the integer part joins the number
    /// unless an identifier follows it, so `5.abs` stays `5`, `.`, `abs`.
    fn number(&mut self, start: Position) -> Token {
        let leading_dot = self.cursor.slice_from(start) == ".";
        self.cursor.eat_while(|c| c.is_ascii_digit());

        let mut is_float = leading_dot;
        if !leading_dot
            && self.cursor.current() == Some('.')
            && !self.cursor.peek().is_some_and(is_ident_start)
        {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, self.cursor.slice_from(start), start)
    }

    fn ident(&mut self, start: Position) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, start)
    }

    /// Whether the whole source has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_eof()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to, not including, `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => None,
            other => Some(other),
        }
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lex a whole source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize_all()
}

/// Source text for a token stream: each token rendered, separated by spaces.
///
/// Re-lexing the result gives back the same kinds and literals.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(Token::render)
        .collect::<Vec<_>>()
        .join(" ")
}
