//! Statement parsing.

use nimini_ir::{CondBranch, Expr, ExprKind, Param, Stmt, StmtKind};
use nimini_lexer::TokenKind;
use nimini_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse one statement, including its line terminator.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Proc => self.parse_proc(),
            TokenKind::Block => self.parse_block(),
            _ => {
                let stmt = self.parse_simple_stmt()?;
                self.expect_terminator()?;
                Ok(stmt)
            }
        })
    }

    /// Statements that fit on one line: declarations, assignment,
    /// `return`, and expression statements.
    fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Var | TokenKind::Let => self.parse_var(),
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.at_line_end() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                Ok(Stmt::new(StmtKind::Return(value), span))
            }
            _ => {
                if let Some(call) = self.try_parse_command_call()? {
                    return Ok(Stmt::new(StmtKind::Expr(call), span));
                }
                let expr = self.parse_expr()?;
                if self.cursor.check(&TokenKind::Eq) {
                    let ExprKind::Ident(target) = expr.kind else {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidAssignmentTarget,
                            expr.span,
                        ));
                    };
                    self.cursor.advance();
                    let value = self.parse_expr()?;
                    return Ok(Stmt::new(StmtKind::Assign { target, value }, span));
                }
                Ok(Stmt::new(StmtKind::Expr(expr), span))
            }
        }
    }

    /// `echo a, b` - a call written without parentheses.
    ///
    /// Only recognized at statement start, when an identifier is directly
    /// followed by something that can only begin an argument.
    fn try_parse_command_call(&mut self) -> Result<Option<Expr>, ParseError> {
        let TokenKind::Ident(name) = self.cursor.current_kind() else {
            return Ok(None);
        };
        let starts_argument = matches!(
            self.cursor.peek_kind(1),
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Dollar
                | TokenKind::Not
        );
        if !starts_argument {
            return Ok(None);
        }
        let name = name.clone();
        let span = self.cursor.advance().span;
        let mut args = vec![self.parse_expr()?];
        while self.cursor.eat(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        Ok(Some(Expr::new(ExprKind::Call { name, args }, span)))
    }

    /// `var name [: type] = init` / `let name [: type] = init`
    fn parse_var(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.advance();
        let inner = |p: &mut Self| -> Result<(String, Expr), ParseError> {
            let (name, _) = p.cursor.expect_ident("a variable name")?;
            if p.cursor.eat(&TokenKind::Colon) {
                p.cursor.expect_ident("a type name")?;
            }
            p.cursor.expect(&TokenKind::Eq, "`=`")?;
            let init = p.parse_expr()?;
            Ok((name, init))
        };
        let (name, init) = inner(self).map_err(|e| e.in_context(ErrorContext::VarDeclaration))?;
        let kind = if keyword.kind == TokenKind::Let {
            StmtKind::Let { name, init }
        } else {
            StmtKind::Var { name, init }
        };
        Ok(Stmt::new(kind, keyword.span))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        let inner = |p: &mut Self| -> Result<StmtKind, ParseError> {
            let primary = p.parse_cond_branch()?;
            let mut elifs = Vec::new();
            while p.cursor.eat(&TokenKind::Elif) {
                elifs.push(p.parse_cond_branch()?);
            }
            let else_body = if p.cursor.eat(&TokenKind::Else) {
                p.cursor.expect(&TokenKind::Colon, "`:`")?;
                Some(p.parse_body()?)
            } else {
                None
            };
            Ok(StmtKind::If {
                primary,
                elifs,
                else_body,
            })
        };
        let kind = inner(self).map_err(|e| e.in_context(ErrorContext::IfStatement))?;
        Ok(Stmt::new(kind, span))
    }

    fn parse_cond_branch(&mut self) -> Result<CondBranch, ParseError> {
        let cond = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Colon, "`:`")?;
        let body = self.parse_body()?;
        Ok(CondBranch { cond, body })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        let inner = |p: &mut Self| -> Result<StmtKind, ParseError> {
            let (var_name, _) = p.cursor.expect_ident("a loop variable")?;
            p.cursor.expect(&TokenKind::In, "`in`")?;
            let iterable = p.parse_expr()?;
            p.cursor.expect(&TokenKind::Colon, "`:`")?;
            let body = p.parse_body()?;
            Ok(StmtKind::For {
                var_name,
                iterable,
                body,
            })
        };
        let kind = inner(self).map_err(|e| e.in_context(ErrorContext::ForLoop))?;
        Ok(Stmt::new(kind, span))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        let inner = |p: &mut Self| -> Result<StmtKind, ParseError> {
            let cond = p.parse_expr()?;
            p.cursor.expect(&TokenKind::Colon, "`:`")?;
            let body = p.parse_body()?;
            Ok(StmtKind::While { cond, body })
        };
        let kind = inner(self).map_err(|e| e.in_context(ErrorContext::WhileLoop))?;
        Ok(Stmt::new(kind, span))
    }

    /// `proc name(a: int, b, c: float): T = body`
    ///
    /// A type written after a group of names applies to the whole group,
    /// as in `proc f(x, y: int)`.
    fn parse_proc(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        let inner = |p: &mut Self| -> Result<StmtKind, ParseError> {
            let (name, _) = p.cursor.expect_ident("a proc name")?;
            p.cursor.expect(&TokenKind::LParen, "`(`")?;
            let params = p.parse_params()?;
            p.cursor.expect(&TokenKind::RParen, "`)`")?;

            // `: T =` is a result type; a lone `:` introduces the body
            if p.cursor.check(&TokenKind::Colon)
                && matches!(p.cursor.peek_kind(1), TokenKind::Ident(_))
                && matches!(p.cursor.peek_kind(2), TokenKind::Eq)
            {
                p.cursor.advance();
                p.cursor.advance();
            }
            if !p.cursor.eat(&TokenKind::Eq) {
                p.cursor.expect(&TokenKind::Colon, "`=` or `:`")?;
            }
            let body = p.parse_body()?;
            Ok(StmtKind::Proc {
                name,
                params,
                body: body.into(),
            })
        };
        let kind = inner(self).map_err(|e| e.in_context(ErrorContext::ProcDeclaration))?;
        Ok(Stmt::new(kind, span))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params: Vec<Param> = Vec::new();
        let mut untyped_from = 0;
        if self.cursor.check(&TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let (name, _) = self.cursor.expect_ident("a parameter name")?;
            params.push(Param::new(name, None));
            if self.cursor.eat(&TokenKind::Colon) {
                let (hint, _) = self.cursor.expect_ident("a type name")?;
                for param in &mut params[untyped_from..] {
                    param.type_hint = Some(hint.clone());
                }
                untyped_from = params.len();
            }
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `block: body` (an optional label before the colon is ignored).
    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let span = self.cursor.advance().span;
        if matches!(self.cursor.current_kind(), TokenKind::Ident(_)) {
            self.cursor.advance();
        }
        self.cursor
            .expect(&TokenKind::Colon, "`:`")
            .map_err(|e| e.in_context(ErrorContext::Block))?;
        let body = self.parse_body()?;
        Ok(Stmt::new(StmtKind::Block(body), span))
    }

    /// The body after a `:` or `=`: an indented block on the following
    /// lines, or one simple statement on the same line.
    pub(crate) fn parse_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if !self.cursor.eat(&TokenKind::Newline) {
            let stmt = self.parse_simple_stmt()?;
            self.expect_terminator()?;
            return Ok(vec![stmt]);
        }
        self.cursor
            .expect(&TokenKind::Indent, "an indented block")
            .map_err(|e| e.in_context(ErrorContext::Block))?;
        let mut body = Vec::new();
        loop {
            while self.cursor.eat(&TokenKind::Newline) {}
            if self.cursor.eat(&TokenKind::Dedent) || self.cursor.is_at_end() {
                break;
            }
            body.push(self.parse_stmt()?);
        }
        Ok(body)
    }

    fn at_line_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        )
    }

    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Newline => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            _ => Err(self.cursor.unexpected("end of line")),
        }
    }
}
