use super::*;

#[test]
fn phase_ranges() {
    assert!(ErrorCode::E0001.is_lexer_error());
    assert!(ErrorCode::E1010.is_parser_error());
    assert!(!ErrorCode::E1010.is_runtime_error());
    assert!(ErrorCode::E2099.is_runtime_error());
    assert!(!ErrorCode::E9001.is_parser_error());
}

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E1002.to_string(), "E1002");
    assert_eq!(format!("{}", ErrorCode::E2004), ErrorCode::E2004.as_str());
}

#[test]
fn descriptions_are_lowercase_fragments() {
    for code in [ErrorCode::E0001, ErrorCode::E1003, ErrorCode::E2010] {
        let text = code.description();
        assert!(!text.is_empty());
        assert!(!text.ends_with('.'));
    }
}
