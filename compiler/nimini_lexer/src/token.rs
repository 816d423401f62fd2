//! Token types produced by the lexer.

use std::fmt;

use nimini_ir::Span;

/// A token with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds after literal cooking and layout.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),

    // Keywords
    Var,
    Let,
    If,
    Elif,
    Else,
    For,
    In,
    While,
    Proc,
    Return,
    Block,
    And,
    Or,
    Not,
    True,
    False,

    // Punctuation and operators
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Dollar,
    DotDot,
    DotDotLt,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Operator text for binary operator tokens, as stored in the AST.
    pub fn binary_symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Amp => "&",
            TokenKind::DotDot => "..",
            TokenKind::DotDotLt => "..<",
            _ => return None,
        };
        Some(symbol)
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f:?}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Indent => "indentation".to_string(),
            TokenKind::Dedent => "end of block".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other.fixed_text()),
        }
    }

    fn fixed_text(&self) -> &'static str {
        match self {
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::While => "while",
            TokenKind::Proc => "proc",
            TokenKind::Return => "return",
            TokenKind::Block => "block",
            TokenKind::Not => "not",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::Dollar => "$",
            other => other.binary_symbol().unwrap_or("?"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// What went wrong while lexing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character `{0}`")]
    InvalidCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("integer literal `{0}` does not fit in 64 bits")]
    IntegerOutOfRange(String),
    #[error("invalid float literal `{0}`")]
    InvalidFloat(String),
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
}

/// A lexing failure at a source position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{span}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}
