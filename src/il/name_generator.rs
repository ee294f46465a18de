use log::trace;

use super::{SequenceNumber, TempId};

/// The two counters of a parse session: one for triad sequence numbers, one
/// for temporaries. Both start at `1`.
#[derive(Debug, Default)]
pub struct NameGenerator {
    sequence: usize,
    temp: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self {
            sequence: 0,
            temp: 0,
        }
    }

    /// Generates the sequence number for the next triad.
    pub fn next_sequence(&mut self) -> SequenceNumber {
        self.sequence += 1;
        SequenceNumber(self.sequence)
    }

    /// Generates a new unique temporary. Must be called immediately before the
    /// sequence number of the triad that produces it is generated.
    pub fn next_temp(&mut self) -> TempId {
        self.temp += 1;
        trace!("allocate temporary ^{}", self.temp);
        TempId(self.temp)
    }
}
