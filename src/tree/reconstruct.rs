use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use log::{debug, trace};
use thiserror::Error;

use crate::il::{Operand, SequenceNumber, TempId, Triad, TriadListing};

use super::TreeNode;

/// Label of the synthetic nodes joining independent subtrees.
const BINDER_LABEL: &str = "Triad";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("temporary {0} does not refer to any triad")]
    DanglingTemporaryReference(TempId),
    #[error("triad {0} refers to its own result")]
    CyclicReference(SequenceNumber),
    #[error("triad {0} is not reachable from any top-level triad")]
    UnreachableTriad(SequenceNumber),
}

/// An expression tree covering one or more triad listings.
#[derive(Debug)]
pub struct ExprTree {
    root: Option<Rc<TreeNode>>,
}

impl ExprTree {
    /// Rebuild the expression tree of a single listing.
    pub fn reconstruct(listing: &TriadListing) -> Result<Self, TreeError> {
        Self::reconstruct_all([listing])
    }

    /// Rebuild the expression trees of several independently parsed listings and
    /// join them, left to right, under binder nodes. Temporaries are only ever
    /// resolved within the listing they appear in.
    pub fn reconstruct_all<'l, I>(listings: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = &'l TriadListing>,
    {
        let mut root = None;

        for listing in listings {
            let mut builder = TreeBuilder::new(listing);
            for triad in top_level(listing) {
                debug!("top-level triad {}: {}", triad.seq(), triad);
                let subtree = builder.expand(triad)?;
                root = Some(merge(root, subtree));
            }
            builder.ensure_all_visited()?;
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// All nodes in display order: pre-order, left subtree before right.
    pub fn preorder(&self) -> Vec<&TreeNode> {
        let mut nodes = vec![];
        let mut pending: Vec<&TreeNode> = self.root().into_iter().collect();

        while let Some(node) = pending.pop() {
            nodes.push(node);
            pending.extend(node.right());
            pending.extend(node.left());
        }
        nodes
    }

    /// The distinct leaf nodes of the tree, in pre-order. A leaf shared by
    /// several triads is only listed once.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut seen = HashSet::new();
        self.preorder()
            .into_iter()
            .filter(|node| node.is_leaf())
            .filter(|node| seen.insert(*node as *const TreeNode))
            .collect()
    }
}

/// Triads whose result is not used directly as an operand by another triad.
fn top_level(listing: &TriadListing) -> impl Iterator<Item = &Triad> {
    let consumed = listing.consumed_temporaries();
    listing
        .iter()
        .filter(move |triad| triad.result().map_or(true, |temp| !consumed.contains(&temp)))
}

fn merge(tree: Option<Rc<TreeNode>>, next: Rc<TreeNode>) -> Rc<TreeNode> {
    match tree {
        None => next,
        Some(tree) => Rc::new(TreeNode::branch(BINDER_LABEL, Some(tree), Some(next))),
    }
}

/// Pending work while expanding a triad.
enum Step<'l> {
    /// Resolve an operand into a leaf or the subtree of its producer.
    Operand(&'l Operand),
    /// Both operands of the triad are on the node stack; join them.
    Finish(&'l Triad),
}

struct TreeBuilder<'l> {
    listing: &'l TriadListing,
    /// Leaf nodes, keyed by the address of the operand they were created for.
    leaves: HashMap<*const Operand, Rc<TreeNode>>,
    /// Triads on the path from the current root to the triad being expanded.
    expanding: HashSet<SequenceNumber>,
    visited: HashSet<SequenceNumber>,
}

impl<'l> TreeBuilder<'l> {
    fn new(listing: &'l TriadListing) -> Self {
        Self {
            listing,
            leaves: HashMap::new(),
            expanding: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Build the subtree rooted at `triad`, expanding every temporary operand
    /// into the subtree of the triad that produced it.
    ///
    /// Works off an explicit stack, so long chains of temporaries cannot
    /// exhaust the call stack.
    fn expand(&mut self, triad: &'l Triad) -> Result<Rc<TreeNode>, TreeError> {
        let mut steps = vec![];
        let mut nodes: Vec<Rc<TreeNode>> = vec![];
        self.enter(triad, &mut steps)?;

        while let Some(step) = steps.pop() {
            match step {
                Step::Operand(operand) => match operand {
                    Operand::Temporary(temp) if temp.is_resolvable() => {
                        let producer = self
                            .listing
                            .get(SequenceNumber(temp.0))
                            .ok_or(TreeError::DanglingTemporaryReference(*temp))?;
                        self.enter(producer, &mut steps)?;
                    }
                    // Negated operands are rendered as they are, even when they wrap a temporary.
                    Operand::Temporary(_)
                    | Operand::Variable(_)
                    | Operand::Constant(_)
                    | Operand::Negated(_) => nodes.push(self.leaf(operand)),
                },
                Step::Finish(triad) => {
                    let right = nodes.pop();
                    let left = nodes.pop();
                    self.expanding.remove(&triad.seq());

                    let label = format!("{}: {}", triad.seq(), triad);
                    let node = Rc::new(TreeNode::branch(label, left, right));
                    if steps.is_empty() {
                        return Ok(node);
                    }
                    nodes.push(node);
                }
            }
        }

        // The root's `Finish` step is always scheduled first, and therefore popped last.
        unreachable!("Expansion of triad {} ended without a root", triad.seq())
    }

    /// Schedules the expansion of `triad`: its left operand first, then its
    /// right operand, then the node joining both.
    fn enter(&mut self, triad: &'l Triad, steps: &mut Vec<Step<'l>>) -> Result<(), TreeError> {
        if !self.expanding.insert(triad.seq()) {
            return Err(TreeError::CyclicReference(triad.seq()));
        }
        self.visited.insert(triad.seq());

        steps.push(Step::Finish(triad));
        steps.push(Step::Operand(triad.right()));
        steps.push(Step::Operand(triad.left()));
        Ok(())
    }

    /// Fails if some triad was not reached from any top-level triad. This only
    /// happens in edited listings, e.g. when triads consume each other's results.
    fn ensure_all_visited(&self) -> Result<(), TreeError> {
        match self
            .listing
            .iter()
            .find(|triad| !self.visited.contains(&triad.seq()))
        {
            Some(triad) => Err(TreeError::UnreachableTriad(triad.seq())),
            None => Ok(()),
        }
    }

    fn leaf(&mut self, operand: &'l Operand) -> Rc<TreeNode> {
        let key = operand as *const Operand;
        if let Some(node) = self.leaves.get(&key) {
            trace!("reuse leaf {}", operand);
            return Rc::clone(node);
        }

        let node = Rc::new(TreeNode::leaf(operand.to_string()));
        self.leaves.insert(key, Rc::clone(&node));
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn labels(nodes: &[&TreeNode]) -> Vec<String> {
        nodes.iter().map(|node| node.label().to_string()).collect()
    }

    #[test]
    fn temporaries_expand_into_subtrees() {
        let listing = parse("a:=b+1;").unwrap();
        let tree = ExprTree::reconstruct(&listing).unwrap();

        assert_eq!(
            vec!["2: := (a ^1)", "a", "1: + (b 1)", "b", "1"],
            labels(&tree.preorder())
        );
    }

    #[test]
    fn leaves_are_exactly_the_variables_and_constants() {
        let listing = parse("c:=(z+a-1)/2+('A'*'T');").unwrap();
        let tree = ExprTree::reconstruct(&listing).unwrap();

        let leaves: HashSet<_> = labels(&tree.leaves()).into_iter().collect();
        let operands: HashSet<_> = listing
            .iter()
            .flat_map(Triad::operands)
            .filter(|operand| matches!(operand, Operand::Variable(_) | Operand::Constant(_)))
            .map(ToString::to_string)
            .collect();

        assert_eq!(operands, leaves);
    }

    #[test]
    fn every_reduced_triad_appears_once() {
        let listing = parse("r:=((a+b)*(c-d))/(e*f+g);").unwrap();
        let tree = ExprTree::reconstruct(&listing).unwrap();
        let nodes = labels(&tree.preorder());

        for triad in listing.iter() {
            let label = format!("{}: {}", triad.seq(), triad);
            assert_eq!(1, nodes.iter().filter(|l| **l == label).count(), "{}", label);
        }
        assert!(!nodes.iter().any(|l| l == BINDER_LABEL));
    }

    #[test]
    fn negated_temporary_is_a_leaf_and_its_triad_a_separate_root() {
        let listing = parse("a:=-(b+c);").unwrap();
        let tree = ExprTree::reconstruct(&listing).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(BINDER_LABEL, root.label());
        assert_eq!("1: + (b c)", root.left().unwrap().label());
        let assign = root.right().unwrap();
        assert_eq!("2: := (a - ^1)", assign.label());
        assert_eq!("- ^1", assign.right().unwrap().label());
        assert!(assign.right().unwrap().is_leaf());
    }

    #[test]
    fn listings_are_merged_left_to_right() {
        let first = parse("a:=b*c;").unwrap();
        let second = parse("d:=e;").unwrap();
        let third = parse("f:=1;").unwrap();

        let tree = ExprTree::reconstruct_all([&first, &second, &third]).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(BINDER_LABEL, root.label());
        assert_eq!("1: := (f 1)", root.right().unwrap().label());
        let inner = root.left().unwrap();
        assert_eq!(BINDER_LABEL, inner.label());
        assert_eq!("2: := (a ^1)", inner.left().unwrap().label());
        assert_eq!("1: := (d e)", inner.right().unwrap().label());
    }

    #[test]
    fn shared_operands_share_one_leaf() {
        let mut listing = parse("a:=(b*c)+d;").unwrap();
        // Make both operands of the addition refer to the product.
        listing
            .edit()
            .set_right(SequenceNumber(2), Operand::Temporary(TempId(1)))
            .unwrap();

        let tree = ExprTree::reconstruct(&listing).unwrap();
        let sum = tree.root().unwrap().right().unwrap();
        let (left, right) = (sum.left().unwrap(), sum.right().unwrap());

        assert_eq!("2: + (^1 ^1)", sum.label());
        assert!(std::ptr::eq(left.left().unwrap(), right.left().unwrap()));
        assert!(std::ptr::eq(left.right().unwrap(), right.right().unwrap()));
        assert_eq!(3, tree.leaves().len());
    }

    #[test]
    fn dangling_temporary_fails() {
        let mut listing = parse("a:=b+c;").unwrap();
        listing
            .edit()
            .set_right(SequenceNumber(2), Operand::Temporary(TempId(5)))
            .unwrap();

        assert_eq!(
            Err(TreeError::DanglingTemporaryReference(TempId(5))),
            ExprTree::reconstruct(&listing).map(|_| ())
        );
    }

    #[test]
    fn self_reference_fails() {
        let mut listing = parse("a:=b+c+d;").unwrap();
        listing
            .edit()
            .set_left(SequenceNumber(1), Operand::Temporary(TempId(2)))
            .unwrap();

        assert_eq!(
            Err(TreeError::CyclicReference(SequenceNumber(2))),
            ExprTree::reconstruct(&listing).map(|_| ())
        );
    }

    #[test]
    fn temporary_zero_is_rendered_as_leaf() {
        let mut listing = parse("a:=b;").unwrap();
        listing
            .edit()
            .set_right(SequenceNumber(1), Operand::Temporary(TempId(0)))
            .unwrap();

        let tree = ExprTree::reconstruct(&listing).unwrap();

        assert_eq!(vec!["1: := (a ^0)", "a", "^0"], labels(&tree.preorder()));
    }

    #[test]
    fn long_chains_of_temporaries_do_not_exhaust_the_stack() {
        let terms = 50_000;
        let source = format!("a:={}b;", "b+".repeat(terms));
        let listing = parse(&source).unwrap();

        let tree = ExprTree::reconstruct(&listing).unwrap();
        let nodes = tree.preorder();

        assert_eq!(terms + 1, listing.len());
        assert_eq!(format!("{}: := (a ^{})", terms + 1, terms), nodes[0].label());
        assert_eq!(listing.len() + terms + 2, nodes.len());
        assert_eq!(terms + 2, tree.leaves().len());
    }

    #[test]
    fn triads_consuming_each_other_are_unreachable() {
        let mut listing = parse("a:=b+c+d;").unwrap();
        let mut editor = listing.edit();
        editor
            .set_left(SequenceNumber(1), Operand::Temporary(TempId(2)))
            .unwrap();
        editor
            .set_right(SequenceNumber(3), Operand::Variable("e".into()))
            .unwrap();

        assert_eq!(
            Err(TreeError::UnreachableTriad(SequenceNumber(1))),
            ExprTree::reconstruct(&listing).map(|_| ())
        );
    }
}
