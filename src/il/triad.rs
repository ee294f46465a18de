use std::fmt::{self, Display, Formatter};

use super::{Operand, Operator, TempId};

/// The sequence number of a triad. Numbering starts at `1` for every parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceNumber(pub usize);

impl Display for SequenceNumber {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single triad: an operator applied to two operands.
///
/// Triads produced by reducing a binary sub-expression carry the temporary that
/// holds their result. The assignment triad closing a statement carries none.
#[derive(Debug, Clone, PartialEq)]
pub struct Triad {
    seq: SequenceNumber,
    op: Operator,
    left: Operand,
    right: Operand,
    result: Option<TempId>,
}

impl Triad {
    pub fn new(seq: SequenceNumber, op: Operator, left: Operand, right: Operand) -> Self {
        Self {
            seq,
            op,
            left,
            right,
            result: None,
        }
    }

    pub fn with_result(
        seq: SequenceNumber,
        op: Operator,
        left: Operand,
        right: Operand,
        result: TempId,
    ) -> Self {
        Self {
            result: Some(result),
            ..Self::new(seq, op, left, right)
        }
    }

    pub fn seq(&self) -> SequenceNumber {
        self.seq
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    pub fn result(&self) -> Option<TempId> {
        self.result
    }

    pub fn operands(&self) -> [&Operand; 2] {
        [&self.left, &self.right]
    }

    /// Whether both operands of `self` and `other` render identically.
    pub fn same_operands(&self, other: &Triad) -> bool {
        self.left.to_string() == other.left.to_string()
            && self.right.to_string() == other.right.to_string()
    }

    pub(super) fn left_mut(&mut self) -> &mut Operand {
        &mut self.left
    }

    pub(super) fn right_mut(&mut self) -> &mut Operand {
        &mut self.right
    }
}
impl Display for Triad {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.op.render(&self.left, &self.right))
    }
}
