//! Expression and statement nodes.
//!
//! Every node carries the [`Span`] of its first token. Bodies are owned
//! `Vec<Stmt>`s, except a proc's body, which is shared with every function
//! value created from the declaration.

use std::fmt;
use std::rc::Rc;

use crate::Span;

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),
    /// Float literal: `3.5`
    Float(f64),
    /// String literal (escapes already processed): `"hi"`
    Str(String),
    /// Boolean literal: `true` / `false`
    Bool(bool),
    /// Variable reference: `x`
    Ident(String),
    /// Binary operation. `op` is the operator's source token.
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Prefix operation. `op` is the operator's source token.
    Unary { op: String, operand: Box<Expr> },
    /// Call of a named function: `name(args...)`
    Call { name: String, args: Vec<Expr> },
    /// Array literal: `[a, b, c]`
    Array(Vec<Expr>),
    /// Index access: `target[index]`
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// A condition paired with the body it guards (`if` / `elif`).
#[derive(Clone, Debug, PartialEq)]
pub struct CondBranch {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

/// A declared procedure parameter.
///
/// The type hint is kept for tooling; the evaluator never checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, type_hint: Option<String>) -> Self {
        Param {
            name: name.into(),
            type_hint,
        }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Expression evaluated for its effects.
    Expr(Expr),
    /// `var name = init`
    Var { name: String, init: Expr },
    /// `let name = init`
    ///
    /// Surface syntax only: the runtime treats it exactly like `var`.
    Let { name: String, init: Expr },
    /// `name = value`
    Assign { target: String, value: Expr },
    /// `if` with any number of `elif` branches and an optional `else`.
    If {
        primary: CondBranch,
        elifs: Vec<CondBranch>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `for var_name in iterable: body`
    For {
        var_name: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    /// `while cond: body`
    While { cond: Expr, body: Vec<Stmt> },
    /// `proc name(params): body`
    Proc {
        name: String,
        params: Vec<Param>,
        body: Rc<[Stmt]>,
    },
    /// `return value`; `None` for a bare `return`.
    Return(Option<Expr>),
    /// `block: body` - a nested scope.
    Block(Vec<Stmt>),
}

/// A parsed script: the ordered top-level statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Program { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn int(n: i64) -> Expr {
        Expr::new(ExprKind::Int(n), Span::new(1, 1))
    }

    #[test]
    fn test_expr_debug_includes_span() {
        let e = Expr::new(ExprKind::Ident("x".into()), Span::new(2, 5));
        assert_eq!(format!("{e:?}"), "Ident(\"x\") @ 2:5");
    }

    #[test]
    fn test_program_clone_is_independent() {
        let program = Program::new(vec![Stmt::new(
            StmtKind::Var {
                name: "x".into(),
                init: int(1),
            },
            Span::new(1, 1),
        )]);
        let mut copy = program.clone();
        copy.stmts.push(Stmt::new(StmtKind::Return(None), Span::new(2, 1)));
        assert_eq!(program.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_param_hint_optional() {
        let p = Param::new("a", Some("int".into()));
        assert_eq!(p.type_hint.as_deref(), Some("int"));
        assert_eq!(Param::new("b", None).type_hint, None);
    }
}
