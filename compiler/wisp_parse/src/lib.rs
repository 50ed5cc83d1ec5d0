//! Wisp parser.
//!
//! A Pratt parser over the token stream produced by `wisp_lexer`. Prefix and
//! infix handlers live in a [`ParseRules`] registry keyed by token kind, so
//! the expression loop never grows a match arm per operator.
//!
//! Parsing never stops at the first error. A failed statement is recorded,
//! the cursor is resynchronized at the next statement boundary, and parsing
//! continues; [`ParseOutput`] carries every error alongside the best-effort
//! [`Program`].

mod cursor;
mod error;
mod grammar;
mod recovery;
mod rules;

use wisp_ir::ast::{Program, Stmt};
use wisp_ir::{Name, StringInterner, Token, TokenKind};
use wisp_lexer::{LexError, Lexer};

use cursor::Cursor;

pub use error::ParseError;
pub use rules::{InfixFn, InfixRule, ParseRules, Precedence, PrefixFn};

/// Result alias used by every grammar production.
pub type PResult<T> = Result<T, ParseError>;

/// Recursive descent parser state.
pub struct Parser<'a> {
    cursor: Cursor,
    interner: &'a StringInterner,
    rules: ParseRules,
    errors: Vec<ParseError>,
    /// Nesting depth of loop bodies; `break` and `continue` need it above zero.
    loop_depth: u32,
    /// Count of top-level statements parsed before the first error.
    clean_statements: Option<usize>,
    /// Whether the last top-level statement ran into end of input.
    tail_at_eof: bool,
}

impl<'a> Parser<'a> {
    /// Parser with the standard expression grammar.
    pub fn new(tokens: Vec<Token>, interner: &'a StringInterner) -> Self {
        Self::with_rules(tokens, interner, ParseRules::standard())
    }

    /// Parser with a custom handler registry.
    pub fn with_rules(tokens: Vec<Token>, interner: &'a StringInterner, rules: ParseRules) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
            rules,
            errors: Vec::new(),
            loop_depth: 0,
            clean_statements: None,
            tail_at_eof: false,
        }
    }

    /// Parse statements until end of input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(TokenKind::Semicolon) {
                continue;
            }
            let start = self.cursor.position();
            let errors_before = self.errors.len();
            let result = self.parse_statement();
            let failed = result.is_err() || self.errors.len() > errors_before;
            if failed && self.clean_statements.is_none() {
                self.clean_statements = Some(statements.len());
            }
            match result {
                Ok(stmt) => {
                    statements.push(stmt);
                    self.tail_at_eof = self.cursor.is_at_end();
                }
                Err(err) => {
                    self.record_error(err);
                    self.recover(start, recovery::TOP_LEVEL_RECOVERY);
                    self.tail_at_eof = false;
                }
            }
        }
        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program { statements }
    }

    /// The current token.
    #[inline]
    pub fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    /// Consume and return the current token.
    #[inline]
    pub fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    /// Consume a token of `kind` or fail with what was found.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        self.cursor.expect(kind)
    }

    /// Intern an identifier.
    #[inline]
    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn rules(&self) -> &ParseRules {
        &self.rules
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Top-level statements parsed before the first error, or `None` if
    /// there has been no error.
    pub fn clean_statements(&self) -> Option<usize> {
        self.clean_statements
    }

    fn record_error(&mut self, err: ParseError) {
        tracing::trace!(code = %err.code, pos = %err.pos, "{}", err.message);
        self.errors.push(err);
    }

    /// Skip to the next statement boundary, always making progress.
    fn recover(&mut self, start: usize, stop_at: recovery::TokenSet) {
        recovery::synchronize(&mut self.cursor, stop_at);
        if self.cursor.position() == start {
            self.cursor.advance();
        }
    }
}

/// Everything the parser produced for one source text.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    /// Lexical and syntax errors in source order of discovery.
    pub errors: Vec<ParseError>,
    /// Number of leading top-level statements unaffected by any error.
    pub clean_statements: usize,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The statements that can run even though the program has errors.
    pub fn runnable_prefix(&self) -> &[Stmt] {
        let end = self.clean_statements.min(self.program.statements.len());
        &self.program.statements[..end]
    }
}

/// Lex and parse `source`.
///
/// A lexical error ends the token stream where it occurred; tokens before it
/// are still parsed, and parse errors caused by the cut are dropped in favour
/// of the lexical one.
pub fn parse(source: &str, interner: &StringInterner) -> ParseOutput {
    let (tokens, lex_error) = lex(source);
    let ends_cleanly = tokens
        .iter()
        .rev()
        .nth(1)
        .is_some_and(|t| matches!(t.kind, TokenKind::Semicolon | TokenKind::RBrace));

    let mut parser = Parser::new(tokens, interner);
    let program = parser.parse_program();
    let mut clean = parser.clean_statements();
    let tail_at_eof = parser.tail_at_eof;
    let mut errors = parser.into_errors();

    if let Some(lex_error) = lex_error {
        errors.retain(|e| e.pos.offset < lex_error.pos.offset);
        // A final statement that ran into the cut may be missing its end.
        let complete = if tail_at_eof && !ends_cleanly {
            program.statements.len().saturating_sub(1)
        } else {
            program.statements.len()
        };
        clean = Some(clean.map_or(complete, |c| c.min(complete)));
        errors.push(ParseError::from_lex(&lex_error));
    }

    ParseOutput {
        clean_statements: clean.unwrap_or(program.statements.len()),
        program,
        errors,
    }
}

fn lex(source: &str) -> (Vec<Token>, Option<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        match lexer.next_token() {
            Ok(token) => {
                let done = token.kind == TokenKind::Eof;
                tokens.push(token);
                if done {
                    return (tokens, None);
                }
            }
            Err(err) => {
                tokens.push(Token::eof(err.pos));
                return (tokens, Some(err));
            }
        }
    }
}

#[cfg(test)]
mod tests;
