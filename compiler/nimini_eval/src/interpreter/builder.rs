//! `InterpreterBuilder` for configuring a session.

use std::cell::{Cell, RefCell};

use super::{Interpreter, NativeRegistry};
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default limit on nested proc calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`] sessions.
///
/// Defaults: stdout output, a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`], no statement budget, builtins registered.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    statement_budget: Option<u64>,
    with_builtins: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            statement_budget: None,
            with_builtins: true,
        }
    }

    /// Where `echo` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit on nested proc calls; `None` for unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Number of statements the session may execute before failing with
    /// `BudgetExceeded`; `None` for unlimited.
    #[must_use]
    pub fn statement_budget(mut self, budget: Option<u64>) -> Self {
        self.statement_budget = budget;
        self
    }

    /// Whether to register the standard natives (`echo`, `len`, ...).
    #[must_use]
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.with_builtins = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let interp = Interpreter {
            root: RefCell::new(Environment::new()),
            registry: RefCell::new(NativeRegistry::new()),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: RefCell::new(CallStack::new(self.max_call_depth)),
            statement_budget: self.statement_budget,
            statements_run: Cell::new(0),
            closure_envs: RefCell::new(Vec::new()),
        };
        if self.with_builtins {
            crate::builtins::register_builtins(&interp);
        }
        interp
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
