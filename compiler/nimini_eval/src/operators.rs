//! Binary operator implementations.
//!
//! Operands are already evaluated here; the short-circuit forms of `and`
//! and `or` live in the expression evaluator, which only calls into this
//! module for the eager operators.
//!
//! Arithmetic uses integer semantics only when both operands are of kind
//! int. Otherwise both sides go through [`Value::to_float`]. Comparisons
//! always compare float views.

use nimini_ir::BinaryOp;

use crate::errors::{division_by_zero, integer_overflow, modulo_by_zero, EvalResult};
use crate::value::Value;

/// Checked arithmetic where overflow is the only failure.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Integer division, truncating toward zero.
#[inline]
fn checked_div(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(division_by_zero())
    } else {
        checked_arith(a.checked_div(b), "division")
    }
}

/// Integer remainder; the sign follows the dividend.
#[inline]
fn checked_mod(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(modulo_by_zero())
    } else {
        checked_arith(a.checked_rem(b), "remainder")
    }
}

/// Evaluate a binary operator on two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Concat => Ok(Value::string(format!("{left}{right}"))),
        BinaryOp::And => Ok(Value::Bool(left.to_bool() && right.to_bool())),
        BinaryOp::Or => Ok(Value::Bool(left.to_bool() || right.to_bool())),
        BinaryOp::Range => Ok(Value::range(left.to_int()?, right.to_int()?)),
        BinaryOp::RangeExclusive => {
            let start = left.to_int()?;
            let end = right.to_int()?;
            let end = end.checked_sub(1).ok_or_else(|| integer_overflow("range"))?;
            Ok(Value::range(start, end))
        }
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => eval_comparison(op, left.to_float()?, right.to_float()?),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            match (left, right) {
                (Value::Int(a), Value::Int(b)) => eval_int_arith(op, *a, *b),
                _ => Ok(eval_float_arith(op, left.to_float()?, right.to_float()?)),
            }
        }
    }
}

fn eval_int_arith(op: BinaryOp, a: i64, b: i64) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(a, b),
        BinaryOp::Mod => checked_mod(a, b),
        _ => Ok(eval_float_arith(op, int_to_float(a), int_to_float(b))),
    }
}

fn eval_float_arith(op: BinaryOp, a: f64, b: f64) -> Value {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => f64::NAN,
    };
    Value::Float(result)
}

#[expect(clippy::float_cmp, reason = "script equality is exact float equality")]
fn eval_comparison(op: BinaryOp, a: f64, b: f64) -> EvalResult {
    let result = match op {
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        _ => false,
    };
    Ok(Value::Bool(result))
}

#[expect(clippy::cast_precision_loss, reason = "mirrors Value::to_float")]
fn int_to_float(n: i64) -> f64 {
    n as f64
}
