//! Nimini Lexer - tokenizer for the Nimini scripting language.
//!
//! Lexing happens in two passes:
//! 1. `logos` produces raw tokens, skipping whitespace and `#` comments.
//! 2. A layout pass turns line starts into `Newline` / `Indent` / `Dedent`
//!    tokens, the way an indentation-sensitive grammar expects them.
//!
//! Newlines inside `(...)` and `[...]` are not significant, so long
//! argument lists and array literals may wrap freely.

mod layout;
mod line_index;
mod raw_token;
mod token;

use logos::Logos;
use nimini_ir::Span;

pub use line_index::LineIndex;
pub use token::{LexError, LexErrorKind, Token, TokenKind};

use raw_token::RawToken;

/// Lex source text into a laid-out token stream ending in `Eof`.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut raw_tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let range = logos.span();
        let span = index.span_at(range.start);
        let end = index.span_at(range.end);
        let slice = logos.slice();

        match token_result {
            Ok(raw) => {
                raw_tokens.push((Token::new(convert_token(raw, slice, span)?, span), end));
            }
            Err(()) => {
                let kind = if slice.starts_with('"') {
                    LexErrorKind::UnterminatedString
                } else {
                    LexErrorKind::InvalidCharacter(slice.chars().next().unwrap_or('\0'))
                };
                return Err(LexError::new(kind, span));
            }
        }
    }

    layout::layout(raw_tokens, index.end_span())
}

/// Convert a raw token to a `TokenKind`, cooking literals.
fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => slice
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| LexError::new(LexErrorKind::IntegerOutOfRange(slice.to_string()), span))?,
        RawToken::Float => slice
            .parse::<f64>()
            .map(TokenKind::Float)
            .map_err(|_| LexError::new(LexErrorKind::InvalidFloat(slice.to_string()), span))?,
        RawToken::Str => TokenKind::Str(unescape_string(&slice[1..slice.len() - 1], span)?),
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        RawToken::Var => TokenKind::Var,
        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::While => TokenKind::While,
        RawToken::Proc => TokenKind::Proc,
        RawToken::Return => TokenKind::Return,
        RawToken::Block => TokenKind::Block,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Dollar => TokenKind::Dollar,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::DotDotLt => TokenKind::DotDotLt,

        // Skipped by logos, never yielded
        RawToken::Comment => TokenKind::Newline,
    };
    Ok(kind)
}

/// Resolve backslash escapes in the body of a string literal.
fn unescape_string(content: &str, span: Span) -> Result<String, LexError> {
    if !content.contains('\\') {
        return Ok(content.to_string());
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let resolved = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some(other) => {
                return Err(LexError::new(LexErrorKind::InvalidEscape(other), span));
            }
            // The literal regex never ends a body on a lone backslash
            None => '\\',
        };
        result.push(resolved);
    }
    Ok(result)
}
