//! Expression parsing.
//!
//! Binary operators use precedence climbing over
//! [`BinaryOp::precedence`]; all binary operators are left-associative.
//! Prefix operators bind tighter than any binary operator, and postfix
//! indexing tighter still.

use nimini_ir::{BinaryOp, Expr, ExprKind};
use nimini_lexer::TokenKind;
use nimini_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_unary()?;
            loop {
                let Some(symbol) = self.cursor.current_kind().binary_symbol() else {
                    break;
                };
                let Some(op) = BinaryOp::from_symbol(symbol) else {
                    break;
                };
                let prec = op.precedence();
                if prec < min_prec {
                    break;
                }
                self.cursor.advance();
                let right = self.parse_binary(prec + 1)?;
                let span = left.span;
                left = Expr::new(
                    ExprKind::Binary {
                        op: symbol.to_string(),
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                );
            }
            Ok(left)
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let symbol = match self.cursor.current_kind() {
            TokenKind::Minus => "-",
            TokenKind::Not => "not",
            TokenKind::Dollar => "$",
            _ => return self.parse_postfix(),
        };
        let span = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op: symbol.to_string(),
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.cursor.check(&TokenKind::LBracket) {
                self.cursor.advance();
                let index = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RBracket, "`]`")?;
                let span = expr.span;
                expr = Expr::new(
                    ExprKind::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else if self.cursor.check(&TokenKind::LParen) {
                return Err(ParseError::new(ParseErrorKind::InvalidCallee, expr.span));
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(f) => ExprKind::Float(*f),
            TokenKind::Str(s) => ExprKind::Str(s.clone()),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.cursor.advance();
                if self.cursor.check(&TokenKind::LParen) {
                    let args = self
                        .parse_call_args()
                        .map_err(|e| e.in_context(ErrorContext::CallArguments))?;
                    return Ok(Expr::new(ExprKind::Call { name, args }, span));
                }
                return Ok(Expr::new(ExprKind::Ident(name), span));
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen, "`)`")?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                let elements = self
                    .parse_array_elements()
                    .map_err(|e| e.in_context(ErrorContext::ArrayLiteral))?;
                return Ok(Expr::new(ExprKind::Array(elements), span));
            }
            _ => {
                return Err(self
                    .cursor
                    .unexpected("an expression")
                    .in_context(ErrorContext::Expression))
            }
        };
        self.cursor.advance();
        Ok(Expr::new(kind, span))
    }

    /// `(a, b, c)` with an optional trailing comma.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LParen, "`(`")?;
        self.parse_comma_list(&TokenKind::RParen, "`,` or `)`")
    }

    /// `[a, b, c]` with an optional trailing comma.
    fn parse_array_elements(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LBracket, "`[`")?;
        self.parse_comma_list(&TokenKind::RBracket, "`,` or `]`")
    }

    fn parse_comma_list(
        &mut self,
        close: &TokenKind,
        expected: &'static str,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.cursor.eat(close) {
                return Ok(items);
            }
            items.push(self.parse_expr()?);
            if self.cursor.eat(close) {
                return Ok(items);
            }
            self.cursor.expect(&TokenKind::Comma, expected)?;
        }
    }
}
