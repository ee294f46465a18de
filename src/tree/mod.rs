//! Rebuilds a nested expression tree from a flat triad listing.
mod node;
mod reconstruct;
mod render;

pub use node::TreeNode;
pub use reconstruct::{ExprTree, TreeError};
