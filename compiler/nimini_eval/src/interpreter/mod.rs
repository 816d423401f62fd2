//! Interpreter sessions.
//!
//! An `Interpreter` is the explicit context for one embedding session: it
//! owns the root environment, the native registry, the output handler and
//! the call stack. Natives receive it by reference, so they can call back
//! into the session (see [`Interpreter::call_value`]).
//!
//! Procs keep their defining frame alive and that frame usually binds the
//! proc, so the session remembers every closure frame and empties them on
//! [`Interpreter::reset`] and on drop.
//!
//! Sessions are single-threaded. All methods take `&self` so that a
//! native running inside an evaluation can re-enter; mutable state sits
//! in `Cell`/`RefCell` and is only borrowed for the duration of a single
//! bookkeeping step, never across an evaluation.

mod builder;
mod registry;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use registry::NativeRegistry;

use std::cell::{Cell, RefCell};

use nimini_ir::{Program, Span};

use crate::diagnostics::{CallFrame, CallStack};
use crate::environment::{Environment, WeakEnvironment};
use crate::errors::{budget_exceeded, not_callable, EvalError, EvalResult};
use crate::exec::Flow;
use crate::print_handler::SharedPrintHandler;
use crate::value::{Function, NativeFunction, UserFunction, Value};

pub struct Interpreter {
    pub(crate) root: RefCell<Environment>,
    pub(crate) registry: RefCell<NativeRegistry>,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: RefCell<CallStack>,
    pub(crate) statement_budget: Option<u64>,
    pub(crate) statements_run: Cell<u64>,
    pub(crate) closure_envs: RefCell<Vec<WeakEnvironment>>,
}

impl Interpreter {
    /// A session with default configuration and the builtins.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Handle to the current root environment.
    pub fn root(&self) -> Environment {
        self.root.borrow().clone()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Statements executed since the session was built or last reset.
    pub fn statements_executed(&self) -> u64 {
        self.statements_run.get()
    }

    /// Names of the registered natives, sorted.
    pub fn native_names(&self) -> Vec<String> {
        self.registry
            .borrow()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Bind a native function in the root environment, replacing any
    /// existing binding of `name`.
    pub fn register<F>(&self, name: &str, func: F)
    where
        F: Fn(&Interpreter, &Environment, Vec<Value>) -> EvalResult + 'static,
    {
        let native = NativeFunction::new(name, func);
        self.root
            .borrow()
            .define(name, Value::Function(Function::Native(native.clone())));
        self.registry.borrow_mut().insert(native);
        tracing::trace!(name, "registered native");
    }

    /// Replace the root environment with a fresh one holding only the
    /// registered natives.
    ///
    /// Every frame a proc closed over is emptied, so procs created before
    /// the reset are stale: calling one fails on its first free variable.
    pub fn reset(&self) {
        self.release_closures();
        let root = Environment::new();
        for native in self.registry.borrow().iter() {
            root.define(
                native.name(),
                Value::Function(Function::Native(native.clone())),
            );
        }
        *self.root.borrow_mut() = root;
        self.statements_run.set(0);
        tracing::trace!(natives = self.registry.borrow().len(), "reset session");
    }

    /// Forget every registered native and start from an empty root.
    pub fn clear_natives(&self) {
        self.registry.borrow_mut().clear();
        self.reset();
    }

    /// Execute `program`'s statements in `env`, in order.
    ///
    /// A `return` at the top level is inert: its value is discarded and
    /// the next statement runs.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = program.len()))]
    pub fn execute(&self, program: &Program, env: &Environment) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            self.exec_stmt(stmt, env)?;
        }
        Ok(())
    }

    /// Execute `program` in a fresh child of the root and return that
    /// environment, so the host can read the globals it left behind.
    pub fn run(&self, program: &Program) -> Result<Environment, EvalError> {
        let env = self.root().child();
        self.execute(program, &env)?;
        Ok(env)
    }

    /// Execute independent fragments in `env`. A failing fragment does not
    /// prevent later ones from running.
    pub fn run_fragments(
        &self,
        programs: &[Program],
        env: &Environment,
    ) -> Vec<Result<(), EvalError>> {
        programs
            .iter()
            .enumerate()
            .map(|(index, program)| {
                let result = self.execute(program, env);
                if let Err(err) = &result {
                    tracing::warn!(fragment = index, error = %err, "script fragment failed");
                }
                result
            })
            .collect()
    }

    /// Call a function value with already-evaluated arguments.
    ///
    /// For natives that receive procs as arguments.
    pub fn call_value(&self, callee: &Value, args: Vec<Value>, env: &Environment) -> EvalResult {
        match callee {
            Value::Function(function) => self.call_function(function, args, env, None),
            other => Err(not_callable("<value>", other.type_name())),
        }
    }

    pub(crate) fn call_function(
        &self,
        function: &Function,
        args: Vec<Value>,
        caller_env: &Environment,
        call_span: Option<Span>,
    ) -> EvalResult {
        match function {
            Function::Native(native) => native.call(self, caller_env, args),
            Function::User(user) => self.call_user(user, args, call_span),
        }
    }

    /// Run a proc body in a new child of its closure environment.
    ///
    /// Missing arguments bind to nil; extra arguments are dropped.
    fn call_user(
        &self,
        func: &UserFunction,
        args: Vec<Value>,
        call_span: Option<Span>,
    ) -> EvalResult {
        let _span = tracing::debug_span!("call", name = %func.name).entered();
        let pushed = self.call_stack.borrow_mut().push(CallFrame {
            name: func.name.clone(),
            call_span,
        });
        pushed.map_err(|e| self.call_stack.borrow().attach_backtrace(e))?;

        let env = func.closure.child();
        let mut args = args.into_iter();
        for param in &func.params {
            env.define(param.clone(), args.next().unwrap_or_default());
        }
        let result = self
            .exec_block(&func.body, &env)
            .map_err(|e| self.call_stack.borrow().attach_backtrace(e));
        self.call_stack.borrow_mut().pop();

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }

    /// Remember `env` as a proc's closure frame.
    pub(crate) fn track_closure(&self, env: &Environment) {
        let mut envs = self.closure_envs.borrow_mut();
        if envs.last().is_some_and(|last| last.points_to(env)) {
            return;
        }
        if envs.len() == envs.capacity() {
            envs.retain(WeakEnvironment::is_live);
        }
        envs.push(env.downgrade());
    }

    /// Empty every remembered closure frame, breaking proc/frame cycles.
    fn release_closures(&self) {
        let envs = std::mem::take(&mut *self.closure_envs.borrow_mut());
        let mut released = 0usize;
        for env in envs.iter().filter_map(WeakEnvironment::upgrade) {
            env.clear();
            released += 1;
        }
        tracing::trace!(released, "released closure frames");
    }

    /// Count one statement against the budget.
    pub(crate) fn charge_statement(&self) -> Result<(), EvalError> {
        let count = self.statements_run.get().saturating_add(1);
        self.statements_run.set(count);
        match self.statement_budget {
            Some(limit) if count > limit => Err(budget_exceeded(limit)),
            _ => Ok(()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        self.release_closures();
    }
}
