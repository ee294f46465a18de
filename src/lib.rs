//! Translates assignment statements such as `c:=(z+a-1)/2;` into triads, and
//! rebuilds an expression tree from the triads.
//!
//! [`parser::parse`] produces a [`il::TriadListing`] for one statement;
//! [`tree::ExprTree::reconstruct`] turns it back into a tree.

pub mod error;
pub mod il;
pub mod parser;
pub mod prelude;
pub mod scanner;
pub mod tree;
