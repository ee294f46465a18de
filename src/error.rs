//! Errors that point at a location in a statement.
use std::ops::Range;

/// An error that can be reported with a caret under the offending input.
pub trait PositionalError {
    /// The byte range of the statement the error refers to.
    fn range(&self) -> Range<usize>;
    /// The message printed next to the caret.
    fn describe(&self) -> String;

    fn length(&self) -> usize {
        self.range().end - self.range().start
    }
}
