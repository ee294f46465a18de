//! Triads: the three-address intermediate representation produced by the parser.

mod editor;
mod listing;
mod name_generator;
mod operand;
mod operator;
mod triad;
mod verify;

pub use editor::{EditError, ListingEditor};
pub use listing::TriadListing;
pub use name_generator::NameGenerator;
pub use operand::{Constant, Operand, TempId};
pub use operator::Operator;
pub use triad::{SequenceNumber, Triad};
pub use verify::{verify, VerifyError};
