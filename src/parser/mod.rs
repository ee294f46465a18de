//! Recognises an assignment statement and emits its triads.
mod error;
mod parser;

pub use error::{ParseError, Reason, Stage};
pub use parser::{parse, MAX_NESTING};
