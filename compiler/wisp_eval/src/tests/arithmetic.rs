use pretty_assertions::assert_eq;

use super::{eval, eval_err};
use crate::EvalErrorKind;

#[test]
fn precedence() {
    assert_eq!(eval("1 + 2 * 3"), "7");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("2 * 3 % 4 + 1"), "3");
    assert_eq!(eval("-2 * 3"), "-6");
    assert_eq!(eval("1 + 2 < 4 == true"), "true");
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval("10 - 4 - 3"), "3");
    assert_eq!(eval("100 / 10 / 5"), "2.0");
}

#[test]
fn numeric_promotion() {
    assert_eq!(eval("5 / 2"), "2.5");
    assert_eq!(eval("4 / 2"), "2.0");
    assert_eq!(eval("1 + 2.5"), "3.5");
    assert_eq!(eval("3 * 1.0"), "3.0");
    assert_eq!(eval("7 % 3"), "1");
    assert_eq!(eval("7.5 % 2"), "1.5");
    assert_eq!(eval("1 / 0"), "inf");
    assert_eq!(eval("2 == 2.0"), "true");
    assert_eq!(eval("1 < 1.5"), "true");
}

#[test]
fn strings() {
    assert_eq!(eval(r#""foo" + "bar""#), "foobar");
    assert_eq!(eval(r#""abc" < "abd""#), "true");
    assert_eq!(eval(r#""a" == "a""#), "true");
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval("false && missing()"), "false");
    assert_eq!(eval("true || missing()"), "true");
    assert_eq!(eval("true && 1 < 2"), "true");
    let err = eval_err("1 && true");
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    let err = eval_err("true && 1");
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn not_and_truthiness() {
    assert_eq!(eval("!0"), "true");
    assert_eq!(eval("!\"\""), "true");
    assert_eq!(eval("![]"), "true");
    assert_eq!(eval("!{}"), "true");
    assert_eq!(eval("!null"), "true");
    assert_eq!(eval("!!5"), "true");
}

#[test]
fn null_equality_and_errors() {
    assert_eq!(eval("null == null"), "true");
    assert_eq!(eval("null != 0"), "true");
    let err = eval_err("null + 1");
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn arithmetic_errors_carry_operator_position() {
    let err = eval_err("let x = 1;\nx % 0;");
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    assert_eq!(err.pos.map(|p| (p.line, p.column)), Some((2, 2)));

    let err = eval_err("9223372036854775807 + 1");
    assert!(matches!(err.kind, EvalErrorKind::IntegerOverflow { .. }));
}

#[test]
fn compound_assignment() {
    assert_eq!(eval("let x = 5; x += 3; x *= 2; x -= 1; x"), "15");
    assert_eq!(eval("let x = 7; x %= 4; x"), "3");
    assert_eq!(eval("let x = 3; x /= 2; x"), "1.5");
    assert_eq!(eval(r#"let s = "a"; s += "b"; s"#), "ab");
}
