//! Nimini IR - syntax tree types for the Nimini scripting language.
//!
//! This crate contains the data the front end hands to the evaluator:
//! - `Span` for 1-based line/column source locations
//! - Expression and statement nodes (`Expr`, `Stmt`) and `Program`
//! - Operator tables (`BinaryOp`, `UnaryOp`) mapping source tokens to operators
//!
//! # Design Philosophy
//!
//! The tree is pure data. Nodes are immutable once built and own their
//! children, so a parsed `Program` can be evaluated any number of times.
//!
//! Operators are stored in the tree as their source token text, not as
//! resolved enums. Resolution happens at evaluation time through
//! [`BinaryOp::from_symbol`] / [`UnaryOp::from_symbol`], which lets hosts
//! construct trees from any front end and still get a typed
//! "unknown operator" failure for tokens the evaluator does not support.

pub mod ast;
mod operators;
mod span;

pub use ast::{CondBranch, Expr, ExprKind, Param, Program, Stmt, StmtKind};
pub use operators::{BinaryOp, UnaryOp};
pub use span::Span;
