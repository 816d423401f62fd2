//! Raw Token Definition
//!
//! The logos-derived tokenizer output, before literal cooking and
//! indentation layout. Whitespace (including newlines) and comments are
//! skipped here; line structure is recovered from token positions.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("elif")]
    #[token("elseif")]
    Elif,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("proc")]
    Proc,
    #[token("return")]
    Return,
    #[token("block")]
    Block,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("$")]
    Dollar,
    #[token("..")]
    DotDot,
    #[token("..<")]
    DotDotLt,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    // No unescaped newlines inside a string
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    Str,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
