//! Indented outline of an expression tree.
use std::fmt::{self, Display, Formatter};

use super::{ExprTree, TreeNode};

impl Display for ExprTree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.root() {
            Some(root) => write_node(f, root, "", true),
            None => Ok(()),
        }
    }
}

/// Writes `node` and its subtrees in pre-order. The last child of a node is
/// drawn with a corner, any other child with a branch.
fn write_node(f: &mut Formatter, node: &TreeNode, indent: &str, last: bool) -> fmt::Result {
    let mut pending = vec![(node, indent.to_string(), last)];

    while let Some((node, indent, last)) = pending.pop() {
        let (glyph, continuation) = if last { ("└─", "  ") } else { ("├─", "| ") };
        writeln!(f, "{}{}{}", indent, glyph, node)?;

        let indent = format!("{}{}", indent, continuation);
        if let Some(right) = node.right() {
            pending.push((right, indent.clone(), true));
        }
        if let Some(left) = node.left() {
            pending.push((left, indent, node.right().is_none()));
        }
    }
    Ok(())
}
