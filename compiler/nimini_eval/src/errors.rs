//! Runtime error types.
//!
//! Every failure aborts the evaluation in progress; there is no catch
//! construct in the language. `EvalErrorKind` keeps the failures
//! distinguishable so an embedding host can decide what to do with them
//! (report and continue, skip a fragment, or give up).
//!
//! Factory functions are the construction API. They are `#[cold]` since
//! they only run on the failure path.

use std::fmt;

use nimini_ir::Span;

use crate::value::Value;

/// Result of evaluating an expression or calling a function.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Name resolution
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("`{name}` is a {type_name}, not a function")]
    NotCallable { name: String, type_name: &'static str },
    #[error("unknown operator `{op}`")]
    UnknownOperator { op: String },

    // Types and conversions
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("cannot convert {text:?} to {target}")]
    Conversion { text: String, target: &'static str },
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("expected a map, got {type_name}")]
    NotAMap { type_name: &'static str },
    #[error("cannot iterate over {type_name}")]
    NotIterable { type_name: &'static str },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    // Resource limits
    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },
    #[error("statement budget exhausted (limit: {limit})")]
    BudgetExceeded { limit: u64 },

    /// Raised by a host-provided native function.
    #[error("{message}")]
    Host { message: String },
}

impl EvalErrorKind {
    /// Stable kind name shown to script authors and matched by hosts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. } => "UndefinedVariableError",
            Self::NotCallable { .. } => "NotCallableError",
            Self::UnknownOperator { .. } => "UnknownOperatorError",
            Self::TypeMismatch { .. } => "TypeError",
            Self::Conversion { .. } => "ConversionError",
            Self::IndexOutOfBounds { .. } => "IndexError",
            Self::NotAMap { .. } => "NotAMapError",
            Self::NotIterable { .. } => "IterationError",
            Self::DivisionByZero => "DivisionByZeroError",
            Self::ModuloByZero => "ModuloByZeroError",
            Self::IntegerOverflow { .. } => "OverflowError",
            Self::RecursionLimit { .. } => "RecursionError",
            Self::BudgetExceeded { .. } => "BudgetError",
            Self::Host { .. } => "HostError",
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name of the called proc.
    pub name: String,
    /// Where the call was made.
    pub span: Option<Span>,
}

/// Snapshot of the user-function call stack at an error site, most
/// recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Location of the innermost node that was being evaluated.
    pub span: Option<Span>,
    /// Call stack at the error site, when raised inside a proc.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Error raised by host code, for use inside native functions.
    #[cold]
    pub fn host(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Host {
            message: message.into(),
        })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise location is already known.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Stable kind name, see [`EvalErrorKind::name`].
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "{span}: ")?;
        }
        write!(f, "{}: {}", self.kind.name(), self.kind)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Name resolution

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name,
    })
}

#[cold]
pub fn unknown_operator(op: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator { op: op.to_string() })
}

// Types and conversions

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

#[cold]
pub fn conversion_error(text: &str, target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Conversion {
        text: text.to_string(),
        target,
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn not_a_map(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAMap { type_name })
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable { type_name })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Resource limits

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn budget_exceeded(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { limit })
}
