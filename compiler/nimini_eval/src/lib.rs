//! Nimini Eval - tree-walking interpreter for Nimini scripts.
//!
//! # Architecture
//!
//! - [`Value`]: the tagged runtime value, the only type that crosses the
//!   native boundary
//! - [`Environment`]: shared, parent-linked scope frames
//! - [`Interpreter`]: one embedding session (root environment, natives,
//!   output, call stack); both evaluators are its methods
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics on
//!   evaluated operands
//!
//! # Embedding
//!
//! ```ignore
//! let interp = Interpreter::builder().print_handler(buffer_handler()).build();
//! interp.register("beep", |_, _, _| Ok(Value::Nil));
//! let globals = interp.run(&program)?;
//! ```

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::register_builtins;
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, WeakEnvironment};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use exec::Flow;
pub use interpreter::{Interpreter, InterpreterBuilder, NativeRegistry, DEFAULT_MAX_CALL_DEPTH};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{
    ArrayRef, Function, MapRef, NativeFn, NativeFunction, UserFunction, Value, RANGE_MARKER,
};

#[cfg(test)]
mod tests;
