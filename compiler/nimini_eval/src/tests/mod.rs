//! Behavioural tests, mostly written as script source.

mod builtins_tests;
mod value_tests;

use nimini_ir::Program;

use crate::{buffer_handler, Environment, EvalError, EvalErrorKind, Interpreter, Value};

pub(crate) fn parse(source: &str) -> Program {
    match nimini_parse::parse(source) {
        Ok(program) => program,
        Err(e) => panic!("test script failed to parse: {e}"),
    }
}

/// Session whose `echo` output is captured.
pub(crate) fn session() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

/// Run `source` in a fresh session, returning the session and the
/// program's environment.
pub(crate) fn try_run(source: &str) -> Result<(Interpreter, Environment), EvalError> {
    let interp = session();
    let env = interp.run(&parse(source))?;
    Ok((interp, env))
}

pub(crate) fn run(source: &str) -> (Interpreter, Environment) {
    match try_run(source) {
        Ok(result) => result,
        Err(e) => panic!("script failed: {e}"),
    }
}

/// Captured `echo` output of `source`.
pub(crate) fn output(source: &str) -> String {
    let (interp, _) = run(source);
    interp.print_handler().get_output()
}

/// Value of global `name` after running `source`.
pub(crate) fn global(source: &str, name: &str) -> Value {
    let (_, env) = run(source);
    match env.get(name) {
        Ok(value) => value,
        Err(e) => panic!("global {name} missing: {e}"),
    }
}

pub(crate) fn run_err(source: &str) -> EvalError {
    match try_run(source) {
        Ok((_, env)) => panic!("expected failure, globals: {:?}", env.local_names()),
        Err(e) => e,
    }
}

pub(crate) fn err_kind(source: &str) -> EvalErrorKind {
    run_err(source).kind
}
