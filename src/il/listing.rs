use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    slice::Iter,
};

use super::{ListingEditor, Operand, SequenceNumber, TempId, Triad};

/// The ordered triads of one parsed statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriadListing {
    triads: Vec<Triad>,
}

impl TriadListing {
    pub fn new() -> Self {
        Self { triads: vec![] }
    }

    pub(crate) fn push(&mut self, triad: Triad) {
        self.triads.push(triad);
    }

    pub fn iter(&self) -> Iter<'_, Triad> {
        self.triads.iter()
    }

    pub fn len(&self) -> usize {
        self.triads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triads.is_empty()
    }

    pub fn last(&self) -> Option<&Triad> {
        self.triads.last()
    }

    /// Looks up the triad with the given sequence number.
    pub fn get(&self, seq: SequenceNumber) -> Option<&Triad> {
        self.index_of(seq).map(|index| &self.triads[index])
    }

    pub(super) fn get_mut(&mut self, seq: SequenceNumber) -> Option<&mut Triad> {
        self.index_of(seq).map(|index| &mut self.triads[index])
    }

    /// Parsed listings keep triad `k` at index `k - 1`. Any other listing is searched.
    fn index_of(&self, seq: SequenceNumber) -> Option<usize> {
        let expected = seq.0.checked_sub(1)?;
        match self.triads.get(expected) {
            Some(triad) if triad.seq() == seq => Some(expected),
            _ => self.triads.iter().position(|triad| triad.seq() == seq),
        }
    }

    /// Temporaries that appear directly as an operand of some triad.
    pub fn consumed_temporaries(&self) -> HashSet<TempId> {
        self.triads
            .iter()
            .flat_map(Triad::operands)
            .filter_map(Operand::as_temporary)
            .collect()
    }

    /// Opens the listing for operand rewriting.
    pub fn edit(&mut self) -> ListingEditor<'_> {
        ListingEditor::new(self)
    }
}
impl Display for TriadListing {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for triad in &self.triads {
            writeln!(f, "{} {}", triad.seq(), triad)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::il::Operator;

    fn sample() -> TriadListing {
        let mut listing = TriadListing::new();
        listing.push(Triad::with_result(
            SequenceNumber(1),
            Operator::Multiply,
            Operand::Variable("x".into()),
            Operand::Variable("y".into()),
            TempId(1),
        ));
        listing.push(Triad::new(
            SequenceNumber(2),
            Operator::Assign,
            Operand::Variable("z".into()),
            Operand::Temporary(TempId(1)),
        ));
        listing
    }

    #[test]
    fn display_numbers_each_line() {
        assert_eq!("1 * (x y)\n2 := (z ^1)\n", sample().to_string());
    }

    #[test]
    fn get_finds_triads_by_sequence_number() {
        let listing = sample();

        assert_eq!(Operator::Assign, listing.get(SequenceNumber(2)).unwrap().op());
        assert!(listing.get(SequenceNumber(3)).is_none());
    }

    #[test]
    fn consumed_temporaries_are_direct_operands() {
        let listing = sample();

        assert_eq!(HashSet::from([TempId(1)]), listing.consumed_temporaries());
    }

    #[test]
    fn get_falls_back_to_searching_out_of_place_triads() {
        let mut listing = TriadListing::new();
        for seq in [7, 5] {
            listing.push(Triad::new(
                SequenceNumber(seq),
                Operator::Assign,
                Operand::Variable(format!("v{}", seq)),
                Operand::Variable("w".into()),
            ));
        }

        assert_eq!("v5", listing.get(SequenceNumber(5)).unwrap().left().to_string());
        assert_eq!("v7", listing.get(SequenceNumber(7)).unwrap().left().to_string());
        assert!(listing.get(SequenceNumber(1)).is_none());
        assert!(listing.get(SequenceNumber(0)).is_none());
    }
}
