//! Prefix operator implementations.

use wisp_ir::ast::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op, EvalError};
use crate::Value;

/// Evaluate `op operand`.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Value::Float(x) => Ok(Value::Float(-x)),
            other => Err(invalid_unary_op(other.type_name(), op)),
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn negation() {
        assert_eq!(evaluate_unary(&Value::Int(5), UnaryOp::Neg).unwrap(), Value::Int(-5));
        assert_eq!(
            evaluate_unary(&Value::Float(1.5), UnaryOp::Neg).unwrap(),
            Value::Float(-1.5)
        );
        let err = evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "negation" });
        let err = evaluate_unary(&Value::string("x"), UnaryOp::Neg).unwrap_err();
        assert_eq!(err.message, "unary `-` cannot be applied to string");
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(evaluate_unary(&Value::Int(0), UnaryOp::Not).unwrap(), Value::Bool(true));
        assert_eq!(evaluate_unary(&Value::Null, UnaryOp::Not).unwrap(), Value::Bool(true));
        assert_eq!(
            evaluate_unary(&Value::string("x"), UnaryOp::Not).unwrap(),
            Value::Bool(false)
        );
    }
}
