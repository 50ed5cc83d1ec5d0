//! Tokens and the keyword table.

use std::fmt;

use crate::Position;

/// A lexed token.
///
/// `literal` holds the token's source text, except for string literals where
/// it holds the decoded contents (escapes resolved, quotes dropped).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            pos,
        }
    }

    /// End-of-file token at `pos`.
    pub fn eof(pos: Position) -> Self {
        Token::new(TokenKind::Eof, "", pos)
    }

    /// Source text that lexes back to this token's kind and literal.
    ///
    /// Strings are re-quoted with their special characters escaped.
    pub fn render(&self) -> String {
        match self.kind {
            TokenKind::Str => {
                let mut out = String::with_capacity(self.literal.len() + 2);
                out.push('"');
                for c in self.literal.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        '\r' => out.push_str("\\r"),
                        '\0' => out.push_str("\\0"),
                        other => out.push(other),
                    }
                }
                out.push('"');
                out
            }
            TokenKind::Eof => String::new(),
            _ => self.literal.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Int | TokenKind::Float | TokenKind::Illegal => {
                write!(f, "`{}`", self.literal)
            }
            TokenKind::Str => write!(f, "string {}", self.render()),
            _ => write!(f, "{}", self.kind.display_name()),
        }
    }
}

/// Kind tag of a token.
///
/// Fieldless so it can index the parser's handler tables and recovery sets;
/// the payload lives in [`Token::literal`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[repr(u8)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Literals
    Ident,
    Int,
    Float,
    Str,

    // Operators
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Amp,
    Pipe,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Let,
    Const,
    Fn,
    Return,
    If,
    Elif,
    Else,
    While,
    For,
    Break,
    Continue,
    True,
    False,
    Null,
    Class,
    Extends,
    New,
    This,
    Super,
}

impl TokenKind {
    /// Number of kinds; every discriminant is below this.
    pub const COUNT: usize = TokenKind::Super as usize + 1;

    /// Kinds whose spelling never varies.
    pub const FIXED: &'static [TokenKind] = &[
        TokenKind::Assign,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Bang,
        TokenKind::Eq,
        TokenKind::NotEq,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::LtEq,
        TokenKind::GtEq,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::Amp,
        TokenKind::Pipe,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::StarAssign,
        TokenKind::SlashAssign,
        TokenKind::PercentAssign,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Let,
        TokenKind::Const,
        TokenKind::Fn,
        TokenKind::Return,
        TokenKind::If,
        TokenKind::Elif,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::For,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::Class,
        TokenKind::Extends,
        TokenKind::New,
        TokenKind::This,
        TokenKind::Super,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Source spelling for operators, delimiters and keywords.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Illegal
            | TokenKind::Eof
            | TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Str => return None,
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::PercentAssign => "%=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Fn => "fn",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Class => "class",
            TokenKind::Extends => "extends",
            TokenKind::New => "new",
            TokenKind::This => "this",
            TokenKind::Super => "super",
        };
        Some(text)
    }

    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "illegal character",
            TokenKind::Eof => "end of file",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Str => "string",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::Eq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::PlusAssign => "`+=`",
            TokenKind::MinusAssign => "`-=`",
            TokenKind::StarAssign => "`*=`",
            TokenKind::SlashAssign => "`/=`",
            TokenKind::PercentAssign => "`%=`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Let => "`let`",
            TokenKind::Const => "`const`",
            TokenKind::Fn => "`fn`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Elif => "`elif`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Class => "`class`",
            TokenKind::Extends => "`extends`",
            TokenKind::New => "`new`",
            TokenKind::This => "`this`",
            TokenKind::Super => "`super`",
        }
    }

    pub fn is_keyword(self) -> bool {
        self >= TokenKind::Let
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Reserved words, in declaration order.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("fn", TokenKind::Fn),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("class", TokenKind::Class),
    ("extends", TokenKind::Extends),
    ("new", TokenKind::New),
    ("this", TokenKind::This),
    ("super", TokenKind::Super),
];

/// Keyword kind for `ident`, if it is reserved.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == ident)
        .map(|&(_, kind)| kind)
}
