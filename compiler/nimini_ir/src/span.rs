//! Source locations.
//!
//! Nimini diagnostics are reported by line and column, so a span is just
//! the position of the first character of the node.

use std::fmt;

/// Source position of an AST node.
///
/// Both fields are 1-based. `Span::DUMMY` (0:0) marks synthesized nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Span for nodes that have no source text.
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Span { line, column }
    }

    /// Returns `true` for spans created with [`Span::DUMMY`].
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
