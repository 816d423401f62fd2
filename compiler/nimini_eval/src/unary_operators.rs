//! Unary operator implementations.

use nimini_ir::UnaryOp;

use crate::errors::{integer_overflow, EvalResult};
use crate::value::Value;

/// Evaluate a prefix operator on an evaluated operand.
///
/// `-` keeps a float operand as float and converts anything else to int
/// first, so `-"2.5"` is `-2`.
pub fn evaluate_unary(op: UnaryOp, value: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => match value {
            Value::Float(f) => Ok(Value::Float(-f)),
            other => other
                .to_int()?
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.to_bool())),
        UnaryOp::Stringify => Ok(Value::string(value.to_string())),
    }
}
