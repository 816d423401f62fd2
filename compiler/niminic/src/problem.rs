//! Failures reported to the user.
//!
//! A `Problem` is any reason a script did not run to completion. Rendering
//! is kept separate from the data so hosts can match on the variant and
//! the CLI can print `path:line:col: kind: message`.

use std::fmt::Write as _;

use nimini_eval::EvalError;
use nimini_ir::Span;
use nimini_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Problem {
    #[error("cannot read file: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Problem {
    /// Kind name shown before the message.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Problem::Read { .. } => "IoError",
            Problem::Parse(_) => "ParseError",
            Problem::Eval(err) => err.name(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Problem::Read { .. } => None,
            Problem::Parse(err) => Some(err.span),
            Problem::Eval(err) => err.span,
        }
    }

    fn message(&self) -> String {
        match self {
            Problem::Read { source } => source.to_string(),
            Problem::Parse(err) => match err.context {
                Some(context) => format!("{} (while parsing {})", err.kind, context.description()),
                None => err.kind.to_string(),
            },
            Problem::Eval(err) => err.kind.to_string(),
        }
    }

    /// Render for a terminal, attributing the failure to `path`.
    ///
    /// Runtime errors raised inside procs are followed by their backtrace.
    pub fn render(&self, path: &str) -> String {
        let mut out = String::new();
        let _ = match self.span() {
            Some(span) => write!(out, "{path}:{span}: "),
            None => write!(out, "{path}: "),
        };
        let _ = write!(out, "{}: {}", self.kind_name(), self.message());
        if let Problem::Eval(EvalError {
            backtrace: Some(backtrace),
            ..
        }) = self
        {
            if !backtrace.is_empty() {
                let _ = write!(out, "\n{}", backtrace.to_string().trim_end());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use nimini_eval::{EvalErrorKind, Interpreter};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_problem_names_the_construct() {
        let err = match nimini_parse::parse("while true\n  echo 1\n") {
            Ok(_) => panic!("expected a parse error"),
            Err(e) => e,
        };
        let rendered = Problem::from(err).render("loop.nim");
        assert!(rendered.starts_with("loop.nim:1:"));
        assert!(rendered.contains(": ParseError: expected `:`, found "));
        assert!(rendered.ends_with("(while parsing a while loop)"));
    }

    #[test]
    fn eval_problem_without_location() {
        let problem = Problem::from(EvalError::from_kind(EvalErrorKind::DivisionByZero));
        assert_eq!(problem.render("x.nim"), "x.nim: DivisionByZeroError: division by zero");
        assert_eq!(problem.kind_name(), "DivisionByZeroError");
    }

    #[test]
    fn eval_problem_with_backtrace() {
        let interp = Interpreter::builder()
            .print_handler(nimini_eval::silent_handler())
            .build();
        let source = "proc f():\n  return nope\nf()\n";
        let problem = match crate::run_source(&interp, source) {
            Ok(_) => panic!("expected a runtime error"),
            Err(p) => p,
        };
        assert_eq!(
            problem.render("bt.nim"),
            "bt.nim:2:10: UndefinedVariableError: undefined variable: nope\n\
             stack backtrace:\n  0: f at 3:1"
        );
    }

    #[test]
    fn read_problem() {
        let problem = Problem::Read {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(problem.span(), None);
        assert_eq!(problem.render("gone.nim"), "gone.nim: IoError: missing");
    }
}
