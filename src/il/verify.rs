//! Structural validation of a triad listing.
//!
//! A listing produced by the parser always passes; edited or hand-built
//! listings may not.
use std::collections::HashSet;

use thiserror::Error;

use super::{Operand, Operator, SequenceNumber, TempId, TriadListing};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("the listing contains no triads")]
    Empty,
    #[error("the last triad is not an assignment")]
    MissingAssignment,
    #[error("triad {0} has no result but is not the closing assignment")]
    AssignmentNotLast(SequenceNumber),
    #[error("triad {seq} produces temporary {temp}, which should be ^{seq}")]
    TemporaryMismatch { seq: SequenceNumber, temp: TempId },
    #[error("triad {seq} refers to temporary {temp}, which no triad produces")]
    DanglingTemporary { seq: SequenceNumber, temp: TempId },
}

/// Verifies the numbering invariants of a listing. Returns the first error found.
pub fn verify(listing: &TriadListing) -> Result<(), VerifyError> {
    let last = listing.last().ok_or(VerifyError::Empty)?;
    if last.op() != Operator::Assign || last.result().is_some() {
        return Err(VerifyError::MissingAssignment);
    }

    let mut produced = HashSet::new();
    for triad in listing.iter() {
        match triad.result() {
            Some(temp) if temp.0 != triad.seq().0 => {
                return Err(VerifyError::TemporaryMismatch {
                    seq: triad.seq(),
                    temp,
                })
            }
            Some(temp) => {
                produced.insert(temp);
            }
            None if triad.seq() != last.seq() => {
                return Err(VerifyError::AssignmentNotLast(triad.seq()))
            }
            None => (),
        }
    }

    for triad in listing.iter() {
        for operand in triad.operands() {
            if let Some(temp) = referenced_temporary(operand) {
                if !produced.contains(&temp) {
                    return Err(VerifyError::DanglingTemporary {
                        seq: triad.seq(),
                        temp,
                    });
                }
            }
        }
    }

    Ok(())
}

/// The temporary an operand refers to, looking through negation.
fn referenced_temporary(operand: &Operand) -> Option<TempId> {
    match operand {
        Operand::Temporary(temp) => Some(*temp),
        Operand::Negated(inner) => referenced_temporary(inner),
        Operand::Variable(_) | Operand::Constant(_) => None,
    }
}
