//! An ordered tree balanced by the AVL scheme.

use compare::{Compare, Natural};
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::mem::swap;

use crate::node::{self, Iter, ModCount, OrderedNode};
use crate::tree::BinaryTree;

pub type Link<T> = Option<Box<Node<T>>>;

/// A node in an [`AvlTree`].
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node { value, height: 1, left: None, right: None }
    }

    fn update_height(&mut self) {
        self.height = 1 + std::cmp::max(height(&self.left), height(&self.right));
    }

    // Left height minus right height; an AVL tree keeps this in [-1, 1].
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

impl<T> OrderedNode for Node<T> {
    type Value = T;

    fn value(&self) -> &T { &self.value }
    fn left(&self) -> Option<&Self> { self.left.as_deref() }
    fn right(&self) -> Option<&Self> { self.right.as_deref() }
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

// Promotes the left child into `node`'s position, demoting `node` to its
// right, and recomputes both heights bottom-up. The caller's link now owns
// the new subtree root.
fn rotate_right<T>(node: &mut Box<Node<T>>) {
    let mut pivot = node.left.take().unwrap();
    swap(&mut node.left, &mut pivot.right);
    swap(node, &mut pivot);
    pivot.update_height();
    node.right = Some(pivot);
    node.update_height();
}

fn rotate_left<T>(node: &mut Box<Node<T>>) {
    let mut pivot = node.right.take().unwrap();
    swap(&mut node.right, &mut pivot.left);
    swap(node, &mut pivot);
    pivot.update_height();
    node.left = Some(pivot);
    node.update_height();
}

// Restores |balance| <= 1 at `node` after a mutation in one of its subtrees.
// The double-rotation cases fire when the heavy child leans the other way.
fn rebalance<T>(node: &mut Box<Node<T>>) {
    node.update_height();

    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().unwrap().balance_factor() < 0 {
            rotate_left(node.left.as_mut().unwrap());
        }
        rotate_right(node);
    } else if balance < -1 {
        if node.right.as_ref().unwrap().balance_factor() > 0 {
            rotate_right(node.right.as_mut().unwrap());
        }
        rotate_left(node);
    }
}

fn insert<T, C>(link: &mut Link<T>, cmp: &C, value: T) -> bool where C: Compare<T> {
    match *link {
        None => {
            *link = Some(Box::new(Node::new(value)));
            true
        }
        Some(ref mut node) => {
            let inserted = match cmp.compare(&value, &node.value) {
                Equal => return false,
                Less => insert(&mut node.left, cmp, value),
                Greater => insert(&mut node.right, cmp, value),
            };

            if inserted { rebalance(node); }
            inserted
        }
    }
}

fn remove<T, C>(link: &mut Link<T>, cmp: &C, value: &T) -> bool where C: Compare<T> {
    let ordering = match *link {
        None => return false,
        Some(ref node) => cmp.compare(value, &node.value),
    };

    let removed = match ordering {
        Less => remove(&mut link.as_mut().unwrap().left, cmp, value),
        Greater => remove(&mut link.as_mut().unwrap().right, cmp, value),
        Equal => {
            remove_root(link);
            true
        }
    };

    if removed {
        if let Some(ref mut node) = *link { rebalance(node); }
    }

    removed
}

// Unlinks the node at `link`: nodes with at most one child are spliced out;
// a node with two children keeps its place and takes over the value of its
// in-order successor, which is removed from the right subtree instead.
fn remove_root<T>(link: &mut Link<T>) {
    let mut node = link.take().unwrap();

    *link = match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (left, right) => {
            node.left = left;
            node.right = right;
            node.value = take_min(&mut node.right);
            Some(node)
        }
    };
}

// Removes the minimum of a non-empty subtree, rebalancing its spine, and
// returns the removed value.
fn take_min<T>(link: &mut Link<T>) -> T {
    if link.as_ref().unwrap().left.is_some() {
        let node = link.as_mut().unwrap();
        let value = take_min(&mut node.left);
        rebalance(node);
        value
    } else {
        let mut node = link.take().unwrap();
        *link = node.right.take();
        node.value
    }
}

/// An ordered tree that maintains the AVL height invariant: at every node,
/// the heights of the two subtrees differ by at most one.
///
/// Every mutation restores the invariant on its way back up to the root, so
/// search, insertion and removal all stay O(log n). Values are unique;
/// inserting a value the tree already contains keeps the existing value and
/// changes nothing.
///
/// The behavior of this tree is undefined if a value's ordering relative to
/// any other value changes while the value is in the tree. This is normally
/// only possible through `Cell`, `RefCell`, or unsafe code.
///
/// # Examples
///
/// ```
/// use bst::{AvlTree, BinaryTree};
///
/// let mut tree = AvlTree::new();
///
/// for value in 0..100 {
///     tree.insert(value);
/// }
///
/// assert_eq!(tree.len(), 100);
/// assert!(tree.contains(&99));
/// assert!(tree.max_depth() <= 8); // 100 sorted insertions stay logarithmic
///
/// tree.remove(&50);
/// assert!(!tree.contains(&50));
/// ```
pub struct AvlTree<T, C = Natural<T>> where C: Compare<T> {
    root: Link<T>,
    mods: ModCount,
    cmp: C,
}

impl<T> AvlTree<T> where T: Ord {
    /// Creates an empty tree ordered according to the natural order of its
    /// values.
    pub fn new() -> AvlTree<T> { AvlTree::with_cmp(compare::natural()) }
}

impl<T, C> AvlTree<T, C> where C: Compare<T> {
    /// Creates an empty tree ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> AvlTree<T, C> {
        AvlTree { root: None, mods: ModCount::new(), cmp }
    }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }
}

impl<T, C> BinaryTree<T> for AvlTree<T, C> where C: Compare<T> {
    type Node = Node<T>;

    fn root(&self) -> Option<&Node<T>> { self.root.as_deref() }

    fn mod_count(&self) -> &ModCount { &self.mods }

    /// Inserts a value, rebalancing the insertion path.
    ///
    /// Returns `false` on a duplicate, in which case the tree is unchanged.
    /// Every call counts as a structural modification for outstanding
    /// iterators, even when nothing was inserted.
    fn insert(&mut self, value: T) -> bool {
        self.mods.bump();
        insert(&mut self.root, &self.cmp, value)
    }

    /// Removes a value, rebalancing the removal path.
    ///
    /// Unlike insertion, a removal can require a rotation at every ancestor
    /// of the removed node. Returns `false` if the value was absent.
    fn remove(&mut self, value: &T) -> bool {
        let removed = remove(&mut self.root, &self.cmp, value);
        if removed { self.mods.bump(); }
        removed
    }

    fn contains(&self, value: &T) -> bool {
        node::contains(self.root.as_deref(), &self.cmp, value)
    }
}

impl<T, C> Clone for AvlTree<T, C> where T: Clone, C: Clone + Compare<T> {
    /// Clones the tree's nodes. The clone gets a fresh modification counter:
    /// it shares no iterator-invalidation state with the original.
    fn clone(&self) -> AvlTree<T, C> {
        AvlTree { root: self.root.clone(), mods: ModCount::new(), cmp: self.cmp.clone() }
    }
}

impl<T, C> Debug for AvlTree<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        node::fmt_in_order(self.root.as_deref(), f)
    }
}

impl<T, C> Default for AvlTree<T, C> where C: Compare<T> + Default {
    fn default() -> AvlTree<T, C> { AvlTree::with_cmp(Default::default()) }
}

impl<T, C> Drop for AvlTree<T, C> where C: Compare<T> {
    // Outstanding iterators hold pointers into the tree; the bump makes them
    // fail fast instead of dangling.
    fn drop(&mut self) { self.mods.bump(); }
}

impl<T, C> Extend<T> for AvlTree<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for value in it { self.insert(value); }
    }
}

impl<T, C> FromIterator<T> for AvlTree<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> AvlTree<T, C> {
        let mut tree: AvlTree<T, C> = Default::default();
        tree.extend(it);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> where T: Clone, C: Compare<T> {
    type Item = T;
    type IntoIter = Iter<Node<T>>;
    fn into_iter(self) -> Iter<Node<T>> { self.iter() }
}

#[cfg(test)]
mod test {
    use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

    use super::{AvlTree, Link};
    use crate::tree::BinaryTree;

    // Checks the AVL invariants and the height bookkeeping over the whole
    // tree, returning the subtree height.
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

                let lh = check(&node.left);
                let rh = check(&node.right);
                assert!(lh.abs_diff(rh) <= 1, "node out of balance");
                assert_eq!(node.height, 1 + lh.max(rh), "stale height");
                node.height
            }
        }
    }

    fn assert_avl<T: Ord>(tree: &AvlTree<T>) {
        check(&tree.root);
    }

    /// An operation on a tree.
    #[derive(Clone, Debug)]
    enum Op {
        /// Insert a value into the tree.
        Insert(u32),
        /// Remove the value at index `n % tree.len()` from the tree.
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
        fn exec(self, tree: &mut AvlTree<u32>) {
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
    fn balanced_after_every_op() {
        fn check_ops(ops: Vec<Op>) -> TestResult {
            let mut tree = AvlTree::new();
            for op in ops {
                op.exec(&mut tree);
                assert_avl(&tree);
            }
            TestResult::passed()
        }

        quickcheck(check_ops as fn(_) -> _);
    }

    #[test]
    fn removal_rebalances_every_ancestor() {
        let mut tree = AvlTree::new();
        for value in 0..128 {
            tree.insert(value);
        }

        // Strip one side; the survivors must stay balanced throughout.
        for value in 0..64 {
            assert!(tree.remove(&value));
            assert_avl(&tree);
        }

        assert_eq!(tree.len(), 64);
        assert!(tree.max_depth() <= 8);
    }

    #[test]
    fn random_churn_stays_balanced() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xa71);
        let mut tree = AvlTree::new();

        for _ in 0..5000 {
            let value: u32 = rng.gen_range(0..512);
            if rng.gen() {
                tree.insert(value);
            } else {
                tree.remove(&value);
            }
        }

        assert_avl(&tree);
    }

    #[test]
    fn scenario() {
        let mut tree = AvlTree::new();
        for value in [5, 3, 8, 1, 4, 7, 9, 2, 6, 0] {
            assert!(tree.insert(value));
        }

        assert!(tree.remove(&5));

        assert!(!tree.contains(&5));
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.iter().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 6, 7, 8, 9]);
        assert!(tree.max_depth() <= 4);
        assert_avl(&tree);
    }
}
