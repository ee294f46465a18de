//! Operand rewriting on a finished listing.
//!
//! Parsing never rewrites a triad once it has been pushed. Later passes that
//! need to change operands go through a [`ListingEditor`], so every mutation
//! of published triads is explicit at the call site.
use std::mem;

use log::debug;
use thiserror::Error;

use super::{Operand, SequenceNumber, TriadListing};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no triad with sequence number {0}")]
    UnknownTriad(SequenceNumber),
}

pub struct ListingEditor<'l> {
    listing: &'l mut TriadListing,
}

impl<'l> ListingEditor<'l> {
    pub(super) fn new(listing: &'l mut TriadListing) -> Self {
        Self { listing }
    }

    /// Replaces the left operand of a triad, returning the previous operand.
    pub fn set_left(&mut self, seq: SequenceNumber, operand: Operand) -> Result<Operand, EditError> {
        let triad = self
            .listing
            .get_mut(seq)
            .ok_or(EditError::UnknownTriad(seq))?;
        debug!("{}: replace left operand {} with {}", seq, triad.left(), operand);
        Ok(mem::replace(triad.left_mut(), operand))
    }

    /// Replaces the right operand of a triad, returning the previous operand.
    pub fn set_right(&mut self, seq: SequenceNumber, operand: Operand) -> Result<Operand, EditError> {
        let triad = self
            .listing
            .get_mut(seq)
            .ok_or(EditError::UnknownTriad(seq))?;
        debug!("{}: replace right operand {} with {}", seq, triad.right(), operand);
        Ok(mem::replace(triad.right_mut(), operand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        il::{Constant, TempId},
        parser::parse,
    };

    #[test]
    fn set_left_and_right_rewrite_one_triad() {
        let mut listing = parse("a:=b*c;").unwrap();

        let mut editor = listing.edit();
        let old_left = editor
            .set_left(SequenceNumber(1), Operand::Constant(Constant::Number(2.0)))
            .unwrap();
        let old_right = editor
            .set_right(SequenceNumber(2), Operand::Variable("d".into()))
            .unwrap();

        assert_eq!(Operand::Variable("b".into()), old_left);
        assert_eq!(Operand::Temporary(TempId(1)), old_right);
        assert_eq!("1 * (2 c)\n2 := (a d)\n", listing.to_string());
    }

    #[test]
    fn editing_an_unknown_triad_fails() {
        let mut listing = parse("a:=b;").unwrap();

        let result = listing
            .edit()
            .set_left(SequenceNumber(7), Operand::Variable("x".into()));

        assert_eq!(Err(EditError::UnknownTriad(SequenceNumber(7))), result);
        assert_eq!("1 := (a b)\n", listing.to_string());
    }
}
