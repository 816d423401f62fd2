//! Byte offset to line/column mapping.

use nimini_ir::Span;

/// Line start table for one source text.
///
/// Columns count characters, so a tab or a multi-byte character is one
/// column wide.
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex {
            source,
            line_starts,
        }
    }

    /// 1-based line and column of a byte offset.
    pub fn span_at(&self, offset: usize) -> Span {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map_or(0, |text| text.chars().count());
        Span::new(to_u32(line + 1), to_u32(column + 1))
    }

    /// Position just past the last character.
    pub fn end_span(&self) -> Span {
        self.span_at(self.source.len())
    }

    /// Number of lines (a trailing newline starts a new, empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
