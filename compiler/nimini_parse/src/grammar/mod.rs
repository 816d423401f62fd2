//! Grammar rules, split by syntactic category.

mod expr;
mod stmt;
