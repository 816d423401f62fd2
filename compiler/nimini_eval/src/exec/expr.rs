//! Expression evaluation.

use nimini_ir::{BinaryOp, Expr, ExprKind, UnaryOp};
use nimini_stack::ensure_sufficient_stack;

use crate::environment::Environment;
use crate::errors::{not_callable, unknown_operator, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

impl Interpreter {
    /// Reduce `expr` to a value in `env`.
    pub fn evaluate(&self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, env)).map_err(|e| e.or_span(expr.span))
    }

    fn eval_inner(&self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(f) => Ok(Value::Float(*f)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Ident(name) => env.get(name),
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right, env),
            ExprKind::Unary { op, operand } => {
                let op = UnaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
                let value = self.evaluate(operand, env)?;
                evaluate_unary(op, &value)
            }
            ExprKind::Call { name, args } => {
                let callee = env.get(name)?;
                let Value::Function(function) = &callee else {
                    return Err(not_callable(name, callee.type_name()));
                };
                let args = self.eval_args(args, env)?;
                self.call_function(function, args, env, Some(expr.span))
            }
            ExprKind::Array(items) => Ok(Value::array(self.eval_args(items, env)?)),
            ExprKind::Index { target, index } => {
                let target = self.evaluate(target, env)?;
                let index = self.evaluate(index, env)?;
                target.index(index.to_int()?)
            }
        }
    }

    /// `and` and `or` only evaluate their right operand when needed, and
    /// always produce a bool.
    fn eval_binary(
        &self,
        symbol: &str,
        left: &Expr,
        right: &Expr,
        env: &Environment,
    ) -> EvalResult {
        let op = BinaryOp::from_symbol(symbol).ok_or_else(|| unknown_operator(symbol))?;
        let left = self.evaluate(left, env)?;
        if op.is_short_circuit() {
            // `and` stops on false, `or` on true
            let decided = left.to_bool();
            if decided == (op == BinaryOp::Or) {
                return Ok(Value::Bool(decided));
            }
            return Ok(Value::Bool(self.evaluate(right, env)?.to_bool()));
        }
        let right = self.evaluate(right, env)?;
        evaluate_binary(op, &left, &right)
    }

    /// Evaluate left to right.
    fn eval_args(&self, args: &[Expr], env: &Environment) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.evaluate(arg, env)).collect()
    }
}
