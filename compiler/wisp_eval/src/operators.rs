//! Binary operator implementations.
//!
//! Dispatch is a match on the operand kinds. Equality is handled first and
//! never fails; every other operator is defined per kind pair:
//!
//! - int ∘ int stays int (checked), except `/` which always yields float
//! - a float on either side promotes the other operand
//! - strings concatenate with `+` and compare lexicographically
//! - a `null` operand is a type error

use std::cmp::Ordering;

use wisp_ir::ast::BinaryOp;

use crate::errors::{
    binary_type_mismatch, integer_overflow, invalid_binary_op, modulo_by_zero, type_mismatch,
    EvalError,
};
use crate::Value;

/// Checked integer arithmetic; `None` means overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<Value, EvalError> {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[inline]
fn compare(ordering: Option<Ordering>, op: BinaryOp) -> Value {
    let result = match op {
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => false,
    };
    Value::Bool(result)
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => {
            let other = if left.is_null() { right } else { left };
            Err(type_mismatch(
                &format!("non-null operands for `{op}`"),
                &format!("null and {}", other.type_name()),
            ))
        }
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => Ok(eval_float_binary(*a, *b, op)),
        (Value::Int(a), Value::Float(b)) => Ok(eval_float_binary(*a as f64, *b, op)),
        (Value::Float(a), Value::Int(b)) => Ok(eval_float_binary(*a, *b as f64, op)),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        _ if left.type_name() == right.type_name() => {
            Err(invalid_binary_op(left.type_name(), op))
        }
        _ => Err(binary_type_mismatch(
            left.type_name(),
            right.type_name(),
            op,
        )),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => Ok(Value::Float(a as f64 / b as f64)),
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => Ok(compare(Some(a.cmp(&b)), op)),
    }
}

/// IEEE semantics throughout: division by zero yields an infinity or NaN.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Mod => Value::Float(a % b),
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => compare(a.partial_cmp(&b), op),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            Ok(compare(Some(a.cmp(b)), op))
        }
        _ => Err(invalid_binary_op("string", op)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn eval(left: Value, op: BinaryOp, right: Value) -> Value {
        evaluate_binary(&left, &right, op).unwrap()
    }

    fn fail(left: Value, op: BinaryOp, right: Value) -> EvalError {
        evaluate_binary(&left, &right, op).unwrap_err()
    }

    #[test]
    fn int_arithmetic_stays_int() {
        assert_eq!(eval(Value::Int(2), BinaryOp::Add, Value::Int(3)).to_string(), "5");
        assert_eq!(eval(Value::Int(7), BinaryOp::Mod, Value::Int(3)).to_string(), "1");
        assert_eq!(eval(Value::Int(-7), BinaryOp::Mod, Value::Int(3)).to_string(), "-1");
    }

    #[test]
    fn division_always_yields_float() {
        assert_eq!(eval(Value::Int(5), BinaryOp::Div, Value::Int(2)).to_string(), "2.5");
        assert_eq!(eval(Value::Int(4), BinaryOp::Div, Value::Int(2)).to_string(), "2.0");
        assert_eq!(eval(Value::Int(1), BinaryOp::Div, Value::Int(0)).to_string(), "inf");
        assert_eq!(eval(Value::Int(-1), BinaryOp::Div, Value::Int(0)).to_string(), "-inf");
        assert_eq!(eval(Value::Int(0), BinaryOp::Div, Value::Int(0)).to_string(), "NaN");
    }

    #[test]
    fn float_promotes() {
        assert_eq!(eval(Value::Int(1), BinaryOp::Add, Value::Float(0.5)).to_string(), "1.5");
        assert_eq!(eval(Value::Float(2.0), BinaryOp::Mul, Value::Int(3)).to_string(), "6.0");
        assert_eq!(eval(Value::Float(5.5), BinaryOp::Mod, Value::Int(2)).to_string(), "1.5");
    }

    #[test]
    fn overflow_is_an_error() {
        let err = fail(Value::Int(i64::MAX), BinaryOp::Add, Value::Int(1));
        assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "addition" });
        let err = fail(Value::Int(i64::MIN), BinaryOp::Mod, Value::Int(-1));
        assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "remainder" });
    }

    #[test]
    fn int_modulo_by_zero() {
        let err = fail(Value::Int(1), BinaryOp::Mod, Value::Int(0));
        assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    }

    #[test]
    fn comparisons_mix_numeric_kinds() {
        assert_eq!(eval(Value::Int(1), BinaryOp::Lt, Value::Float(1.5)), Value::Bool(true));
        assert_eq!(eval(Value::Float(2.0), BinaryOp::GtEq, Value::Int(2)), Value::Bool(true));
        assert_eq!(eval(Value::Int(3), BinaryOp::Eq, Value::Float(3.0)), Value::Bool(true));
    }

    #[test]
    fn strings_concatenate_and_compare() {
        assert_eq!(
            eval(Value::string("ab"), BinaryOp::Add, Value::string("cd")).to_string(),
            "abcd"
        );
        assert_eq!(
            eval(Value::string("apple"), BinaryOp::Lt, Value::string("banana")),
            Value::Bool(true)
        );
        let err = fail(Value::string("a"), BinaryOp::Mul, Value::string("b"));
        assert_eq!(err.message, "operator `*` cannot be applied to string");
    }

    #[test]
    fn null_equality_never_fails() {
        assert_eq!(eval(Value::Null, BinaryOp::Eq, Value::Null), Value::Bool(true));
        assert_eq!(eval(Value::Null, BinaryOp::NotEq, Value::Int(0)), Value::Bool(true));
    }

    #[test]
    fn null_with_other_operators_is_a_type_error() {
        let err = fail(Value::Null, BinaryOp::Add, Value::Int(1));
        assert_eq!(err.code(), wisp_diagnostic::ErrorCode::E2001);
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
        let err = fail(Value::Int(1), BinaryOp::Lt, Value::Null);
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn booleans_only_compare_for_equality() {
        assert_eq!(eval(Value::Bool(true), BinaryOp::Eq, Value::Bool(true)), Value::Bool(true));
        let err = fail(Value::Bool(true), BinaryOp::Add, Value::Bool(false));
        assert_eq!(err.message, "operator `+` cannot be applied to bool");
    }

    #[test]
    fn mismatched_kinds() {
        let err = fail(Value::string("a"), BinaryOp::Add, Value::Int(1));
        assert_eq!(err.message, "operator `+` cannot be applied to string and int");
    }
}
