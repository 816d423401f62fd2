//! Recursive descent parser for Nimini.
//!
//! Consumes the laid-out token stream from `nimini_lexer` and builds a
//! `nimini_ir::Program`. Statements are line-oriented; compound statements
//! (`if`, `for`, `while`, `proc`, `block`) take either an indented block
//! or a single statement on the same line after the `:`.
//!
//! Parsing stops at the first error. Scripts are small and re-run often,
//! so no recovery is attempted.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

use nimini_ir::Program;
use nimini_lexer::{Token, TokenKind};

/// Parser state.
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse a whole program.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        loop {
            while self.cursor.eat(&TokenKind::Newline) {}
            if self.cursor.is_at_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }
        tracing::debug!(count = stmts.len(), "parsed top-level statements");
        Ok(Program::new(stmts))
    }
}

/// Lex and parse source text.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = nimini_lexer::lex(source)?;
    Parser::new(tokens).parse_program()
}
