//! Command handlers for the `nimini` CLI.
//!
//! Handlers return their result instead of exiting, so the binary decides
//! how to report and the handlers stay testable.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::run_file;

use crate::Problem;

/// Read a script, turning I/O failures into a [`Problem`].
pub(crate) fn read_file(path: &str) -> Result<String, Problem> {
    std::fs::read_to_string(path).map_err(|source| Problem::Read { source })
}
