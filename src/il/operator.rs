use std::fmt::{self, Display, Formatter};

use super::Operand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Applied directly to an operand (see [`Operand::negate`]); never stored in a triad.
    UnaryMinus,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => ":=",
            Self::Add => "+",
            Self::Subtract | Self::UnaryMinus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Assign | Self::UnaryMinus)
    }

    /// Renders the operator applied to a pair of operands, e.g. `+ (a ^1)`.
    pub fn render(self, left: &Operand, right: &Operand) -> String {
        match self {
            Self::UnaryMinus => format!("{} {}", self.symbol(), left),
            _ => format!("{} ({} {})", self.symbol(), left, right),
        }
    }
}
impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
