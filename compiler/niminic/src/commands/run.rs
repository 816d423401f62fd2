//! The `run` command: parse and evaluate a script.

use nimini_eval::{Interpreter, SharedPrintHandler};

use super::read_file;
use crate::{run_source, Problem};

/// Run the script at `path` with the builtins, sending `echo` output to
/// `output`.
pub fn run_file(path: &str, output: SharedPrintHandler) -> Result<(), Problem> {
    let source = read_file(path)?;
    let interp = Interpreter::builder().print_handler(output).build();
    let _span = tracing::debug_span!("run_file", path).entered();
    run_source(&interp, &source)?;
    Ok(())
}
