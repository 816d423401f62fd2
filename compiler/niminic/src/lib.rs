//! Nimini driver.
//!
//! Glue between the front end and the evaluator for hosts that start from
//! source text, plus the commands behind the `nimini` binary.

pub mod commands;
mod problem;

use std::sync::Once;

use nimini_eval::{Environment, Interpreter};

pub use problem::Problem;

/// Parse `source` and run it in a fresh child of `interp`'s root.
///
/// Returns the environment holding the script's globals.
pub fn run_source(interp: &Interpreter, source: &str) -> Result<Environment, Problem> {
    let program = nimini_parse::parse(source)?;
    tracing::debug!(stmts = program.len(), "parsed script");
    Ok(interp.run(&program)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
///
/// `NIMINI_LOG_TREE` switches to an indented tree of call spans, which is
/// easier to follow for nested proc calls. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("NIMINI_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use nimini_eval::{buffer_handler, Value};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn run_source_returns_globals() {
        let interp = Interpreter::builder().print_handler(buffer_handler()).build();
        let env = run_source(&interp, "var x = 2\necho x * 21\n");
        assert_eq!(env.ok().and_then(|e| e.lookup("x")), Some(Value::int(2)));
        assert_eq!(interp.print_handler().get_output(), "42\n");
    }

    #[test]
    fn parse_failures_run_nothing() {
        let interp = Interpreter::builder().print_handler(buffer_handler()).build();
        let result = run_source(&interp, "echo 1\nvar = 2\n");
        assert!(matches!(result, Err(Problem::Parse(_))));
        assert_eq!(interp.print_handler().get_output(), "");
    }

    #[test]
    fn runtime_failures_keep_earlier_output() {
        let interp = Interpreter::builder().print_handler(buffer_handler()).build();
        let result = run_source(&interp, "echo 1\necho 1 / 0\necho 2\n");
        assert!(matches!(result, Err(Problem::Eval(_))));
        assert_eq!(interp.print_handler().get_output(), "1\n");
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
