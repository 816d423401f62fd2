//! Token cursor for navigating the token stream.

use nimini_ir::Span;
use nimini_lexer::{Token, TokenKind};

use crate::{ParseError, ParseErrorKind};

/// Position in a laid-out token list.
///
/// The list always ends in `Eof`, and the cursor never moves past it.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let span = tokens.last().map_or(Span::new(1, 1), |t| t.span);
            tokens.push(Token::new(TokenKind::Eof, span));
        }
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token `n` positions ahead.
    pub fn peek_kind(&self, n: usize) -> &TokenKind {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token's kind, ignoring any payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Move to the next token, returning the one just consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub fn expect_ident(&mut self, expected: &'static str) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Error describing the current token as unexpected.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: self.current_kind().describe(),
            },
            self.current_span(),
        )
    }
}
