//! The read-only node contract and the traversal engine built on it.
//!
//! Each tree keeps its own concrete node type, since balance metadata differs
//! between strategies, but they all implement [`OrderedNode`], and every
//! read-only algorithm in this module is written against that contract alone.
//! Mutation stays on the concrete types, so one strategy's code can never
//! touch another's invariant fields.

mod iter;

use compare::Compare;
use std::cell::Cell;
use std::cmp::Ordering::*;
use std::rc::Rc;

pub use self::iter::Iter;

/// A node in an ordered binary tree.
///
/// The contract is read-only on purpose: it exposes exactly what in-order
/// traversal, containment and depth measurement need, and nothing a caller
/// could use to violate a balancing invariant.
pub trait OrderedNode: Sized {
    /// The type of the values stored in the tree.
    type Value;

    /// Returns a reference to the node's value.
    fn value(&self) -> &Self::Value;

    /// Returns a reference to the node's left child, if any.
    fn left(&self) -> Option<&Self>;

    /// Returns a reference to the node's right child, if any.
    fn right(&self) -> Option<&Self>;
}

/// Checks whether the subtree under `node` contains `value`.
///
/// A plain binary-search descent: O(height) comparisons, `false` on an empty
/// subtree.
pub fn contains<N, C>(mut node: Option<&N>, cmp: &C, value: &N::Value) -> bool
    where N: OrderedNode, C: Compare<N::Value> {

    while let Some(n) = node {
        match cmp.compare(value, n.value()) {
            Equal => return true,
            Less => node = n.left(),
            Greater => node = n.right(),
        }
    }

    false
}

/// Counts the nodes of the subtree under `node` by full traversal.
///
/// The node contract carries no cached length, so this is O(n). The walk uses
/// an explicit stack: a degenerate tree is as deep as it is long, and this
/// must not overflow on one.
pub fn size<N>(node: Option<&N>) -> usize where N: OrderedNode {
    let mut stack: Vec<&N> = node.into_iter().collect();
    let mut count = 0;

    while let Some(n) = stack.pop() {
        count += 1;
        if let Some(left) = n.left() { stack.push(left); }
        if let Some(right) = n.right() { stack.push(right); }
    }

    count
}

/// Returns the greatest number of nodes on any root-to-leaf path, or 0 for an
/// empty subtree.
///
/// Non-recursive for the same reason as [`size`]: the interesting callers are
/// exactly the degenerate trees.
pub fn max_depth<N>(node: Option<&N>) -> usize where N: OrderedNode {
    let mut stack: Vec<(&N, usize)> = match node {
        None => return 0,
        Some(root) => vec![(root, 1)],
    };

    let mut max = 0;

    while let Some((n, depth)) = stack.pop() {
        if depth > max { max = depth; }
        if let Some(right) = n.right() { stack.push((right, depth + 1)); }
        if let Some(left) = n.left() { stack.push((left, depth + 1)); }
    }

    max
}

// Set-style `{a, b, c}` rendering, in order, without cloning any values.
pub(crate) fn fmt_in_order<N>(root: Option<&N>, f: &mut std::fmt::Formatter) -> std::fmt::Result
    where N: OrderedNode, N::Value: std::fmt::Debug {

    write!(f, "{{")?;

    let mut stack: Vec<&N> = vec![];
    let mut node = root;
    let mut first = true;

    loop {
        while let Some(n) = node {
            stack.push(n);
            node = n.left();
        }

        match stack.pop() {
            None => break,
            Some(n) => {
                if first { first = false; } else { write!(f, ", ")?; }
                write!(f, "{:?}", n.value())?;
                node = n.right();
            }
        }
    }

    write!(f, "}}")
}

/// A tree's structural modification counter.
///
/// The counter cell is shared between the tree and its iterators: an iterator
/// snapshots the count at creation and refuses to continue once the live
/// count has moved on. The tree bumps the counter on every insertion, on
/// every removal that unlinks a node, and when it is dropped.
///
/// The drop bump is what makes [`Iter`]'s raw node pointers sound: while the
/// count an iterator observes is unchanged, the tree that issued it still
/// owns every node the iterator has yet to visit.
#[derive(Debug, Default)]
pub struct ModCount(Rc<Cell<u64>>);

impl ModCount {
    /// Creates a counter starting at zero.
    pub fn new() -> ModCount { ModCount(Rc::new(Cell::new(0))) }

    /// Returns the current count.
    pub fn value(&self) -> u64 { self.0.get() }

    /// Records a structural modification.
    pub(crate) fn bump(&self) { self.0.set(self.0.get().wrapping_add(1)); }

    /// Returns a handle onto the same counter cell, for an iterator to watch.
    pub(crate) fn watch(&self) -> ModCount { ModCount(Rc::clone(&self.0)) }
}
