//! Property test: rendering a token stream and lexing it again gives back
//! the same kinds and literals.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use wisp_ir::{lookup_keyword, Position, Token, TokenKind};
use wisp_lexer::{render_tokens, tokenize};

fn identifier() -> impl Strategy<Value = Token> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,10}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| lookup_keyword(s).is_none())
        .prop_map(|s| Token::new(TokenKind::Ident, s, Position::START))
}

fn integer() -> impl Strategy<Value = Token> {
    prop::string::string_regex("[0-9]{1,12}")
        .expect("valid regex")
        .prop_map(|s| Token::new(TokenKind::Int, s, Position::START))
}

fn float() -> impl Strategy<Value = Token> {
    prop_oneof![
        prop::string::string_regex("[0-9]{1,6}\\.[0-9]{1,6}").expect("valid regex"),
        prop::string::string_regex("\\.[0-9]{1,6}").expect("valid regex"),
        prop::string::string_regex("[0-9]{1,6}\\.").expect("valid regex"),
    ]
    .prop_map(|s| Token::new(TokenKind::Float, s, Position::START))
}

fn string() -> impl Strategy<Value = Token> {
    prop::string::string_regex("[a-z \"\\\\\n\t\r'{}]{0,12}")
        .expect("valid regex")
        .prop_map(|s| Token::new(TokenKind::Str, s, Position::START))
}

fn fixed() -> impl Strategy<Value = Token> {
    prop::sample::select(TokenKind::FIXED).prop_map(|kind| {
        let text = kind.fixed_text().unwrap_or_default();
        Token::new(kind, text, Position::START)
    })
}

fn illegal() -> impl Strategy<Value = Token> {
    prop::sample::select(vec!["@", "#", "$", "~", "^", "?", "`", "\\"])
        .prop_map(|s| Token::new(TokenKind::Illegal, s, Position::START))
}

fn token() -> impl Strategy<Value = Token> {
    prop_oneof![
        3 => fixed(),
        2 => identifier(),
        1 => integer(),
        1 => float(),
        1 => string(),
        1 => illegal(),
    ]
}

fn strip(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| (t.kind, t.literal.clone()))
        .collect()
}

proptest! {
    #[test]
    fn render_then_relex_is_identity(tokens in prop::collection::vec(token(), 0..40)) {
        let source = render_tokens(&tokens);
        let relexed = tokenize(&source).unwrap();
        prop_assert_eq!(strip(&tokens), strip(&relexed), "source: {:?}", source);
    }

    #[test]
    fn relexing_source_is_stable(source in "[a-z0-9 +*/%=<>!&|.,;:(){}\\[\\]\"]{0,60}") {
        // Arbitrary input either fails on an unterminated string or lexes to
        // a stream whose rendering lexes back to itself.
        if let Ok(tokens) = tokenize(&source) {
            let rendered = render_tokens(&tokens);
            let again = tokenize(&rendered).unwrap();
            prop_assert_eq!(strip(&tokens), strip(&again));
        }
    }
}
