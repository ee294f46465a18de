use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A node of an expression tree. Triad nodes are labelled with their sequence
/// number and triad text, leaves with the operand they stand for.
///
/// Children are reference counted so that a cached leaf can be shared by
/// every triad that refers to the same operand.
#[derive(Debug)]
pub struct TreeNode {
    label: String,
    left: Option<Rc<TreeNode>>,
    right: Option<Rc<TreeNode>>,
}

impl TreeNode {
    pub fn leaf<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            left: None,
            right: None,
        }
    }

    pub fn branch<S: Into<String>>(
        label: S,
        left: Option<Rc<TreeNode>>,
        right: Option<Rc<TreeNode>>,
    ) -> Self {
        Self {
            label: label.into(),
            left,
            right,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    /// The children of this node, left before right.
    pub fn children(&self) -> impl Iterator<Item = &TreeNode> {
        self.left().into_iter().chain(self.right())
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
/// Dropping a deep chain of nodes recursively would overflow the stack, so
/// subtrees that are no longer shared are released from a work list instead.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<Rc<TreeNode>> =
            self.left.take().into_iter().chain(self.right.take()).collect();

        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(node) {
                pending.extend(node.left.take());
                pending.extend(node.right.take());
            }
        }
    }
}
impl Display for TreeNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.label)
    }
}
