//! An ordered tree balanced by left-leaning red-black coloring.
//!
//! The scheme is the single-pass variant: insertion and removal fix the
//! coloring invariants at every node on the way back up, and removal borrows
//! redness from siblings on the way *down* so the target can be unlinked
//! without breaking the black-height balance.

use compare::{Compare, Natural};
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::mem::swap;

use crate::node::{self, Iter, ModCount, OrderedNode};
use crate::tree::BinaryTree;

pub type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Color {
    Red,
    Black,
}

impl Color {
    fn flip(&mut self) {
        *self = match *self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        };
    }
}

/// A node in a [`RedBlackTree`].
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    color: Color,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node { value, color: Color::Red, left: None, right: None }
    }
}

impl<T> OrderedNode for Node<T> {
    type Value = T;

    fn value(&self) -> &T { &self.value }
    fn left(&self) -> Option<&Self> { self.left.as_deref() }
    fn right(&self) -> Option<&Self> { self.right.as_deref() }
}

fn is_red<T>(link: &Link<T>) -> bool {
    link.as_ref().map_or(false, |node| node.color == Color::Red)
}

// The rotations swap colors so that color follows the position rather than
// the node: the promoted child takes the old root's color and the demoted
// node turns red.

fn rotate_left<T>(node: &mut Box<Node<T>>) {
    let mut pivot = node.right.take().unwrap();
    swap(&mut node.right, &mut pivot.left);
    swap(node, &mut pivot);
    node.color = pivot.color;
    pivot.color = Color::Red;
    node.left = Some(pivot);
}

fn rotate_right<T>(node: &mut Box<Node<T>>) {
    let mut pivot = node.left.take().unwrap();
    swap(&mut node.left, &mut pivot.right);
    swap(node, &mut pivot);
    node.color = pivot.color;
    pivot.color = Color::Red;
    node.right = Some(pivot);
}

// Toggles `node` and both children; pushes redness down on the insertion
// path and pulls it up during removal fixups. Callers guarantee both
// children exist.
fn flip_colors<T>(node: &mut Node<T>) {
    node.color.flip();
    node.left.as_mut().unwrap().color.flip();
    node.right.as_mut().unwrap().color.flip();
}

fn insert<T, C>(link: &mut Link<T>, cmp: &C, value: T) -> bool where C: Compare<T> {
    let node = match *link {
        None => {
            *link = Some(Box::new(Node::new(value)));
            return true;
        }
        Some(ref mut node) => node,
    };

    let inserted = match cmp.compare(&value, &node.value) {
        Equal => false,
        Less => insert(&mut node.left, cmp, value),
        Greater => insert(&mut node.right, cmp, value),
    };

    // Restore left-leaning, break up a left red pair, push redness up; the
    // same three checks run at every ancestor on the unwind.
    if is_red(&node.right) && !is_red(&node.left) { rotate_left(node); }
    if is_red(&node.left) && is_red(&node.left.as_ref().unwrap().left) { rotate_right(node); }
    if is_red(&node.left) && is_red(&node.right) { flip_colors(node); }

    inserted
}

// Ensures the left child or its left child is red before descending left,
// borrowing from the right sibling if need be.
fn move_red_left<T>(node: &mut Box<Node<T>>) {
    flip_colors(node);
    if is_red(&node.right.as_ref().unwrap().left) {
        rotate_right(node.right.as_mut().unwrap());
        rotate_left(node);
    }
}

// Mirror image, for descents to the right.
fn move_red_right<T>(node: &mut Box<Node<T>>) {
    flip_colors(node);
    if is_red(&node.left.as_ref().unwrap().left) {
        rotate_right(node);
    }
}

// The insertion fixups again, minus the left-red guard on the first check;
// run on every frame of the removal unwind.
fn balance<T>(node: &mut Box<Node<T>>) {
    if is_red(&node.right) { rotate_left(node); }
    if is_red(&node.left) && is_red(&node.left.as_ref().unwrap().left) { rotate_right(node); }
    if is_red(&node.left) && is_red(&node.right) { flip_colors(node); }
}

// Removes the subtree's minimum and returns its value. The caller has
// already ensured redness is within reach of the left spine.
fn take_min<T>(link: &mut Link<T>) -> T {
    if link.as_ref().unwrap().left.is_none() {
        let node = link.take().unwrap();
        debug_assert!(node.right.is_none());
        node.value
    } else {
        let node = link.as_mut().unwrap();
        if !is_red(&node.left) && !is_red(&node.left.as_ref().unwrap().left) {
            move_red_left(node);
        }
        let value = take_min(&mut node.left);
        balance(node);
        value
    }
}

// The caller guarantees `value` is present in this subtree.
fn remove<T, C>(link: &mut Link<T>, cmp: &C, value: &T) where C: Compare<T> {
    if cmp.compares_lt(value, &link.as_ref().unwrap().value) {
        let node = link.as_mut().unwrap();
        if !is_red(&node.left) && !is_red(&node.left.as_ref().unwrap().left) {
            move_red_left(node);
        }
        remove(&mut node.left, cmp, value);
        balance(node);
    } else {
        if is_red(&link.as_ref().unwrap().left) {
            rotate_right(link.as_mut().unwrap());
        }

        let at_bottom = {
            let node = link.as_ref().unwrap();
            cmp.compares_eq(value, &node.value) && node.right.is_none()
        };
        if at_bottom {
            // Black-height uniformity leaves no left child here either.
            let node = link.take().unwrap();
            debug_assert!(node.left.is_none());
            return;
        }

        let node = link.as_mut().unwrap();
        if !is_red(&node.right) && !is_red(&node.right.as_ref().unwrap().left) {
            move_red_right(node);
        }

        if cmp.compares_eq(value, &node.value) {
            // Two effective children: the in-order successor's value is
            // copied up and the successor removed from the right subtree.
            node.value = take_min(&mut node.right);
        } else {
            remove(&mut node.right, cmp, value);
        }

        balance(node);
    }
}

/// An ordered tree that maintains the red-black invariants: no red node has
/// a red child, every path from a node down to an absent child passes the
/// same number of black nodes, and the root is black. Red links additionally
/// always lean left.
///
/// Guarantees and API are the same as [`AvlTree`](crate::AvlTree)'s; only
/// the balancing strategy differs. The red-black height bound is looser
/// (`2·log2(n+1)`) but removal does less restructuring on average.
///
/// # Examples
///
/// ```
/// use bst::{BinaryTree, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
///
/// tree.insert("b");
/// tree.insert("a");
/// tree.insert("c");
///
/// assert!(tree.contains(&"b"));
/// assert!(!tree.remove(&"d"));
/// assert!(tree.remove(&"b"));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), ["a", "c"]);
/// ```
pub struct RedBlackTree<T, C = Natural<T>> where C: Compare<T> {
    root: Link<T>,
    mods: ModCount,
    cmp: C,
}

impl<T> RedBlackTree<T> where T: Ord {
    /// Creates an empty tree ordered according to the natural order of its
    /// values.
    pub fn new() -> RedBlackTree<T> { RedBlackTree::with_cmp(compare::natural()) }
}

impl<T, C> RedBlackTree<T, C> where C: Compare<T> {
    /// Creates an empty tree ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> RedBlackTree<T, C> {
        RedBlackTree { root: None, mods: ModCount::new(), cmp }
    }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }
}

impl<T, C> BinaryTree<T> for RedBlackTree<T, C> where C: Compare<T> {
    type Node = Node<T>;

    fn root(&self) -> Option<&Node<T>> { self.root.as_deref() }

    fn mod_count(&self) -> &ModCount { &self.mods }

    fn insert(&mut self, value: T) -> bool {
        self.mods.bump();
        let inserted = insert(&mut self.root, &self.cmp, value);
        self.root.as_mut().unwrap().color = Color::Black;
        inserted
    }

    fn remove(&mut self, value: &T) -> bool {
        // The recursive removal assumes the value is present somewhere below
        // it, so absent values are filtered out up front.
        if !self.contains(value) { return false; }

        remove(&mut self.root, &self.cmp, value);
        if let Some(ref mut node) = self.root { node.color = Color::Black; }
        self.mods.bump();
        true
    }

    fn contains(&self, value: &T) -> bool {
        node::contains(self.root.as_deref(), &self.cmp, value)
    }
}

impl<T, C> Clone for RedBlackTree<T, C> where T: Clone, C: Clone + Compare<T> {
    /// Clones the tree's nodes. The clone gets a fresh modification counter.
    fn clone(&self) -> RedBlackTree<T, C> {
        RedBlackTree { root: self.root.clone(), mods: ModCount::new(), cmp: self.cmp.clone() }
    }
}

impl<T, C> Debug for RedBlackTree<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        node::fmt_in_order(self.root.as_deref(), f)
    }
}

impl<T, C> Default for RedBlackTree<T, C> where C: Compare<T> + Default {
    fn default() -> RedBlackTree<T, C> { RedBlackTree::with_cmp(Default::default()) }
}

impl<T, C> Drop for RedBlackTree<T, C> where C: Compare<T> {
    fn drop(&mut self) { self.mods.bump(); }
}

impl<T, C> Extend<T> for RedBlackTree<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for value in it { self.insert(value); }
    }
}

impl<T, C> FromIterator<T> for RedBlackTree<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> RedBlackTree<T, C> {
        let mut tree: RedBlackTree<T, C> = Default::default();
        tree.extend(it);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C> where T: Clone, C: Compare<T> {
    type Item = T;
    type IntoIter = Iter<Node<T>>;
    fn into_iter(self) -> Iter<Node<T>> { self.iter() }
}

#[cfg(test)]
mod test {
    use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

    use super::{is_red, Color, Link, RedBlackTree};
    use crate::tree::BinaryTree;

    // Checks ordering, left-leaning coloring and black-height uniformity,
    // returning the subtree's black-height.
    fn check<T: Ord>(link: &Link<T>) -> usize {
        match *link {
            None => 0,
            Some(ref node) => {
                if let Some(ref left) = node.left {
                    assert!(left.value < node.value, "left child out of order");
                }
                if let Some(ref right) = node.right {
                    assert!(right.value > node.value, "right child out of order");
                }

                assert!(!is_red(&node.right), "right-leaning red link");
                if node.color == Color::Red {
                    assert!(!is_red(&node.left), "red node with red child");
                }

                let lb = check(&node.left);
                let rb = check(&node.right);
                assert_eq!(lb, rb, "unequal black-heights");
                lb + (node.color == Color::Black) as usize
            }
        }
    }

    fn assert_red_black<T: Ord>(tree: &RedBlackTree<T>) {
        if let Some(ref root) = tree.root {
            assert_eq!(root.color, Color::Black, "red root");
        }
        check(&tree.root);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u32),
        Remove(usize),
    }

    impl Arbitrary for Op {
        fn arbitrary(gen: &mut Gen) -> Op {
            if bool::arbitrary(gen) {
                Op::Insert(u32::arbitrary(gen))
            } else {
                Op::Remove(usize::arbitrary(gen))
            }
        }
    }

    impl Op {
        fn exec(self, tree: &mut RedBlackTree<u32>) {
            match self {
                Op::Insert(value) => { tree.insert(value); }
                Op::Remove(index) => if !tree.is_empty() {
                    let value = tree.iter().nth(index % tree.len()).unwrap();
                    tree.remove(&value);
                },
            }
        }
    }

    #[test]
    fn invariants_after_every_op() {
        fn check_ops(ops: Vec<Op>) -> TestResult {
            let mut tree = RedBlackTree::new();
            for op in ops {
                op.exec(&mut tree);
                assert_red_black(&tree);
            }
            TestResult::passed()
        }

        quickcheck(check_ops as fn(_) -> _);
    }

    #[test]
    fn move_red_fixups_survive_minimum_drain() {
        let mut tree = RedBlackTree::new();
        for value in 0..256 {
            tree.insert(value);
        }

        // Repeatedly deleting the minimum exercises move_red_left on the
        // whole left spine.
        for value in 0..256 {
            assert!(tree.remove(&value));
            assert_red_black(&tree);
        }

        assert!(tree.is_empty());
    }

    #[test]
    fn random_churn_stays_model_equivalent() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        use std::collections::BTreeSet;

        let mut rng = StdRng::seed_from_u64(0xb57);
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        // A narrow key range keeps the insert/remove interleaving dense, so
        // the deletion fixups fire against every tree shape.
        for _ in 0..5000 {
            let value: u32 = rng.gen_range(0..512);
            if rng.gen() {
                assert_eq!(tree.insert(value), model.insert(value));
            } else {
                assert_eq!(tree.remove(&value), model.remove(&value));
            }
        }

        assert_red_black(&tree);
        assert_eq!(tree.iter().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());

        let n = tree.len() as f64;
        assert!(tree.max_depth() as f64 <= 2.0 * (n + 1.0).log2());
    }

    #[test]
    fn scenario() {
        let mut tree = RedBlackTree::new();
        for value in [5, 3, 8, 1, 4, 7, 9, 2, 6, 0] {
            assert!(tree.insert(value));
        }

        assert!(tree.remove(&5));

        assert!(!tree.contains(&5));
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.iter().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 6, 7, 8, 9]);
        assert_red_black(&tree);
    }
}
