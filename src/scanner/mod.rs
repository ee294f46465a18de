//! Character-level access to a statement. There is no separate token stream:
//! the parser inspects the current character directly.
mod char_ext;
mod char_scanner;

pub use char_ext::CharExt;
pub use char_scanner::CharScanner;
