//! Front-end inspection commands: `lex` and `parse`.

use std::fmt::Write as _;

use super::read_file;
use crate::Problem;

/// Render the syntax tree of the script at `path`.
pub fn parse_file(path: &str) -> Result<String, Problem> {
    let source = read_file(path)?;
    let program = nimini_parse::parse(&source)?;
    let mut out = format!("Parse result for '{path}' ({} statements):\n", program.len());
    for stmt in &program.stmts {
        let _ = writeln!(out, "{stmt:#?}");
    }
    Ok(out)
}

/// Render the laid-out token stream of the script at `path`.
pub fn lex_file(path: &str) -> Result<String, Problem> {
    let source = read_file(path)?;
    let tokens = nimini_lexer::lex(&source).map_err(nimini_parse::ParseError::from)?;
    let mut out = format!("Tokens for '{path}' ({} tokens):\n", tokens.len());
    for token in &tokens {
        let _ = writeln!(out, "  {:?} @ {}", token.kind, token.span);
    }
    Ok(out)
}
