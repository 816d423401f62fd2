//! Binary and unary operators.
//!
//! The AST carries operator tokens as text; these tables are how the
//! evaluator (and the parser's precedence climbing) interpret them.

/// Binary operators understood by the evaluator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical (short-circuit)
    And,
    Or,

    // Other
    /// String concatenation `&`.
    Concat,
    /// Inclusive range `..`.
    Range,
    /// Half-open range `..<`.
    RangeExclusive,
}

impl BinaryOp {
    /// Resolve a source token to an operator.
    ///
    /// Returns `None` for tokens the language does not define.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "and" => Self::And,
            "or" => Self::Or,
            "&" => Self::Concat,
            ".." => Self::Range,
            "..<" => Self::RangeExclusive,
            _ => return None,
        };
        Some(op)
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Concat => "&",
            Self::Range => "..",
            Self::RangeExclusive => "..<",
        }
    }

    /// Binding strength for precedence climbing.
    ///
    /// Higher number = binds more tightly.
    /// - 1: `or`
    /// - 2: `and`
    /// - 3: `==` `!=` `<` `<=` `>` `>=`
    /// - 4: `..` `..<`
    /// - 5: `&`
    /// - 6: `+` `-`
    /// - 7: `*` `/` `%`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Range | Self::RangeExclusive => 4,
            Self::Concat => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div | Self::Mod => 7,
        }
    }

    /// Whether this operator's right operand is evaluated lazily.
    #[inline]
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Numeric negation `-`.
    Neg,
    /// Logical negation `not`.
    Not,
    /// Stringify `$`.
    Stringify,
}

impl UnaryOp {
    /// Resolve a source token to a prefix operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Neg),
            "not" => Some(Self::Not),
            "$" => Some(Self::Stringify),
            _ => None,
        }
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "not",
            Self::Stringify => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_BINARY: [BinaryOp; 16] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Concat,
        BinaryOp::Range,
        BinaryOp::RangeExclusive,
    ];

    #[test]
    fn test_binary_symbols_resolve_back() {
        for op in ALL_BINARY {
            assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
        }
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(BinaryOp::from_symbol("**"), None);
        assert_eq!(BinaryOp::from_symbol("&&"), None);
        assert_eq!(UnaryOp::from_symbol("!"), None);
        assert_eq!(UnaryOp::from_symbol("+"), None);
    }

    #[test]
    fn test_precedence_order() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Concat.precedence());
        assert!(BinaryOp::Concat.precedence() > BinaryOp::Range.precedence());
        assert!(BinaryOp::Range.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn test_short_circuit() {
        assert!(BinaryOp::And.is_short_circuit());
        assert!(BinaryOp::Or.is_short_circuit());
        assert!(!BinaryOp::Concat.is_short_circuit());
    }
}
