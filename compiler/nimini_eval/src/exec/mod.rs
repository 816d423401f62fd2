//! Tree-walking evaluation of expressions and statements.
//!
//! Both evaluators are methods on [`Interpreter`](crate::Interpreter) and
//! run every recursive step through `ensure_sufficient_stack`. An error
//! picks up the span of the innermost node it passes through.

mod expr;
mod stmt;

use crate::value::Value;

/// How a statement finished.
///
/// `return` is threaded back to the nearest proc call as a value, never
/// as an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Ran to completion.
    Normal,
    /// A `return` executed, carrying its value.
    Return(Value),
}
