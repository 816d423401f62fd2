//! Parse error types.

use std::fmt;

use nimini_ir::Span;
use nimini_lexer::{LexError, LexErrorKind};

/// What was being parsed when an error occurred.
///
/// Rendered as a trailing "while parsing ..." note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Expression,
    IfStatement,
    ForLoop,
    WhileLoop,
    ProcDeclaration,
    VarDeclaration,
    Block,
    CallArguments,
    ArrayLiteral,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Expression => "an expression",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::ForLoop => "a for loop",
            ErrorContext::WhileLoop => "a while loop",
            ErrorContext::ProcDeclaration => "a proc declaration",
            ErrorContext::VarDeclaration => "a variable declaration",
            ErrorContext::Block => "an indented block",
            ErrorContext::CallArguments => "call arguments",
            ErrorContext::ArrayLiteral => "an array literal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexErrorKind),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    #[error("only a variable name can be assigned to")]
    InvalidAssignmentTarget,
    #[error("only named procs can be called")]
    InvalidCallee,
}

/// A parse failure at a source position.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach context unless a more specific one is already present.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.kind)?;
        if let Some(context) = self.context {
            write!(f, " (while parsing {})", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
