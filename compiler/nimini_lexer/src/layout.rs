//! Indentation layout.
//!
//! Raw tokens carry no whitespace. A token that starts a new source line
//! outside any bracket opens a logical line: the layout pass emits a
//! `Newline` for the line before it, then `Indent` or `Dedent`s by
//! comparing its column against the indentation stack. A `Newline` sits
//! where the line it ends stops, just past its last token.

use nimini_ir::Span;

use crate::{LexError, LexErrorKind, Token, TokenKind};

/// Lay out raw tokens, each paired with the position just past its text.
pub(crate) fn layout(raw: Vec<(Token, Span)>, end: Span) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::with_capacity(raw.len() + raw.len() / 4 + 2);
    let mut indents: Vec<u32> = vec![0];
    let mut nesting: usize = 0;
    let mut last_line: u32 = 0;
    let mut line_end = end;

    for (token, token_end) in raw {
        let starts_line = token.span.line != last_line;
        last_line = token.span.line;

        if starts_line && nesting == 0 {
            let width = token.span.column.saturating_sub(1);
            if out.is_empty() {
                // The first line sets the base indentation
                indents[0] = width;
            } else {
                out.push(Token::new(TokenKind::Newline, line_end));
            }
            let current = indents.last().copied().unwrap_or(0);
            if width > current {
                indents.push(width);
                out.push(Token::new(TokenKind::Indent, token.span));
            } else {
                while width < indents.last().copied().unwrap_or(0) {
                    indents.pop();
                    out.push(Token::new(TokenKind::Dedent, token.span));
                }
                if width != indents.last().copied().unwrap_or(0) {
                    return Err(LexError::new(LexErrorKind::InconsistentDedent, token.span));
                }
            }
        }

        match token.kind {
            TokenKind::LParen | TokenKind::LBracket => nesting += 1,
            TokenKind::RParen | TokenKind::RBracket => nesting = nesting.saturating_sub(1),
            _ => {}
        }
        out.push(token);
        line_end = token_end;
    }

    if !out.is_empty() {
        out.push(Token::new(TokenKind::Newline, line_end));
    }
    while indents.len() > 1 {
        indents.pop();
        out.push(Token::new(TokenKind::Dedent, end));
    }
    out.push(Token::new(TokenKind::Eof, end));
    Ok(out)
}
