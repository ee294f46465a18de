use std::fmt::{self, Display, Formatter};

/// Identifier of a temporary. A temporary with identifier `k` holds the
/// result of the triad with sequence number `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TempId(pub usize);

impl TempId {
    /// Temporaries start at `1`; anything else can never name a triad.
    pub fn is_resolvable(self) -> bool {
        self.0 > 0
    }
}
impl Display for TempId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "^{}", self.0)
    }
}

/// A value a triad operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A named variable from the source statement.
    Variable(String),
    /// A numeric or character literal.
    Constant(Constant),
    /// The result slot of an earlier triad.
    Temporary(TempId),
    /// The result of applying unary minus. No triad is emitted for it, so the
    /// wrapped operand is carried along as-is.
    Negated(Box<Operand>),
}

impl Operand {
    /// Applies unary minus to this operand.
    pub fn negate(self) -> Self {
        Self::Negated(Box::new(self))
    }

    pub fn as_temporary(&self) -> Option<TempId> {
        match self {
            Self::Temporary(temp) => Some(*temp),
            _ => None,
        }
    }
}
impl Display for Operand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name),
            Self::Constant(constant) => constant.fmt(f),
            Self::Temporary(temp) => temp.fmt(f),
            Self::Negated(inner) => write!(f, "- {}", inner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Number(f64),
    Char(char),
}

impl Constant {
    /// Returns the value of a numeric constant. Character constants have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Char(_) => None,
        }
    }
}
impl Display for Constant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Char(c) => write!(f, "{}", c),
        }
    }
}
