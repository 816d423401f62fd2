//! Statement execution.
//!
//! Scoping rules:
//! - `if`/`elif`/`else` branches, `block`s and each `for` iteration get a
//!   fresh child environment.
//! - A `while` body runs directly in the enclosing environment, so its
//!   declarations persist from one iteration to the next.
//! - `var` and `let` behave the same at runtime; `let` is not enforced.

use std::iter;
use std::ops::RangeInclusive;
use std::rc::Rc;

use nimini_ir::{Stmt, StmtKind};
use nimini_stack::ensure_sufficient_stack;

use super::Flow;
use crate::environment::Environment;
use crate::errors::{not_iterable, EvalError};
use crate::interpreter::Interpreter;
use crate::value::{Function, UserFunction, Value};

impl Interpreter {
    /// Execute one statement in `env`.
    pub fn exec_stmt(&self, stmt: &Stmt, env: &Environment) -> Result<Flow, EvalError> {
        self.charge_statement()
            .and_then(|()| ensure_sufficient_stack(|| self.exec_inner(stmt, env)))
            .map_err(|e| e.or_span(stmt.span))
    }

    /// Execute statements in order in `env`, stopping at the first
    /// `return`.
    pub fn exec_block(&self, stmts: &[Stmt], env: &Environment) -> Result<Flow, EvalError> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_inner(&self, stmt: &Stmt, env: &Environment) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.evaluate(expr, env)?;
            }
            StmtKind::Var { name, init } | StmtKind::Let { name, init } => {
                let value = self.evaluate(init, env)?;
                env.define(name.as_str(), value);
            }
            StmtKind::Assign { target, value } => {
                let value = self.evaluate(value, env)?;
                env.set(target, value);
            }
            StmtKind::If {
                primary,
                elifs,
                else_body,
            } => {
                for branch in iter::once(primary).chain(elifs) {
                    if self.evaluate(&branch.cond, env)?.to_bool() {
                        return self.exec_block(&branch.body, &env.child());
                    }
                }
                if let Some(body) = else_body {
                    return self.exec_block(body, &env.child());
                }
            }
            StmtKind::For {
                var_name,
                iterable,
                body,
            } => {
                let iterable = self.evaluate(iterable, env)?;
                for i in loop_bounds(&iterable)? {
                    let iter_env = env.child();
                    iter_env.define(var_name.as_str(), Value::Int(i));
                    if let Flow::Return(value) = self.exec_block(body, &iter_env)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            StmtKind::While { cond, body } => {
                while self.evaluate(cond, env)?.to_bool() {
                    if let Flow::Return(value) = self.exec_block(body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            StmtKind::Proc { name, params, body } => {
                let function = UserFunction {
                    name: name.clone(),
                    params: params.iter().map(|p| p.name.clone()).collect(),
                    body: Rc::clone(body),
                    closure: env.clone(),
                };
                self.track_closure(env);
                env.define(
                    name.as_str(),
                    Value::Function(Function::User(Rc::new(function))),
                );
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr, env)?,
                    None => Value::Nil,
                };
                return Ok(Flow::Return(value));
            }
            StmtKind::Block(body) => return self.exec_block(body, &env.child()),
        }
        Ok(Flow::Normal)
    }
}

/// Integers a `for` loop visits: a range's inclusive bounds, or `0..n`
/// for a plain int `n`.
fn loop_bounds(iterable: &Value) -> Result<RangeInclusive<i64>, EvalError> {
    if let Some((start, end)) = iterable.as_range() {
        return Ok(start..=end);
    }
    match iterable {
        Value::Int(n) => Ok(0..=n.saturating_sub(1)),
        other => Err(not_iterable(other.type_name())),
    }
}
