//! A plain binary search tree, kept as a baseline.
//!
//! No balancing at all: adversarial (e.g. sorted) input degrades the tree to
//! a linked list and every guarantee to O(n). It exists as the third
//! [`OrderedNode`] variant and as the control group for the balanced trees'
//! depth bounds.

use compare::{Compare, Natural};
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};

use crate::node::{self, Iter, ModCount, OrderedNode};
use crate::tree::BinaryTree;

pub type Link<T> = Option<Box<Node<T>>>;

/// A node in an [`UnbalancedTree`]: a value and two child links, nothing
/// else.
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node { value, left: None, right: None }
    }
}

impl<T> OrderedNode for Node<T> {
    type Value = T;

    fn value(&self) -> &T { &self.value }
    fn left(&self) -> Option<&Self> { self.left.as_deref() }
    fn right(&self) -> Option<&Self> { self.right.as_deref() }
}

fn insert<T, C>(link: &mut Link<T>, cmp: &C, value: T) -> bool where C: Compare<T> {
    match *link {
        None => {
            *link = Some(Box::new(Node::new(value)));
            true
        }
        Some(ref mut node) => match cmp.compare(&value, &node.value) {
            Equal => false,
            Less => insert(&mut node.left, cmp, value),
            Greater => insert(&mut node.right, cmp, value),
        },
    }
}

fn remove<T, C>(link: &mut Link<T>, cmp: &C, value: &T) -> bool where C: Compare<T> {
    let ordering = match *link {
        None => return false,
        Some(ref node) => cmp.compare(value, &node.value),
    };

    match ordering {
        Less => remove(&mut link.as_mut().unwrap().left, cmp, value),
        Greater => remove(&mut link.as_mut().unwrap().right, cmp, value),
        Equal => {
            remove_root(link);
            true
        }
    }
}

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

fn take_min<T>(link: &mut Link<T>) -> T {
    if link.as_ref().unwrap().left.is_some() {
        take_min(&mut link.as_mut().unwrap().left)
    } else {
        let mut node = link.take().unwrap();
        *link = node.right.take();
        node.value
    }
}

/// A binary search tree without rebalancing.
///
/// Shares the whole [`BinaryTree`] surface with the balanced trees, but its
/// height, and with it every operation, is O(n) in the worst case.
///
/// # Examples
///
/// ```
/// use bst::{BinaryTree, UnbalancedTree};
///
/// let mut tree = UnbalancedTree::new();
///
/// for value in 0..100 {
///     tree.insert(value); // sorted input: every node chains to the right
/// }
///
/// assert_eq!(tree.max_depth(), 100);
/// ```
pub struct UnbalancedTree<T, C = Natural<T>> where C: Compare<T> {
    root: Link<T>,
    mods: ModCount,
    cmp: C,
}

impl<T> UnbalancedTree<T> where T: Ord {
    /// Creates an empty tree ordered according to the natural order of its
    /// values.
    pub fn new() -> UnbalancedTree<T> { UnbalancedTree::with_cmp(compare::natural()) }
}

impl<T, C> UnbalancedTree<T, C> where C: Compare<T> {
    /// Creates an empty tree ordered according to the given comparator.
    pub fn with_cmp(cmp: C) -> UnbalancedTree<T, C> {
        UnbalancedTree { root: None, mods: ModCount::new(), cmp }
    }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }
}

impl<T, C> BinaryTree<T> for UnbalancedTree<T, C> where C: Compare<T> {
    type Node = Node<T>;

    fn root(&self) -> Option<&Node<T>> { self.root.as_deref() }

    fn mod_count(&self) -> &ModCount { &self.mods }

    fn insert(&mut self, value: T) -> bool {
        self.mods.bump();
        insert(&mut self.root, &self.cmp, value)
    }

    // The counter is bumped exactly when a node was unlinked, for every
    // shape of removal alike.
    fn remove(&mut self, value: &T) -> bool {
        let removed = remove(&mut self.root, &self.cmp, value);
        if removed { self.mods.bump(); }
        removed
    }

    fn contains(&self, value: &T) -> bool {
        node::contains(self.root.as_deref(), &self.cmp, value)
    }
}

impl<T, C> Clone for UnbalancedTree<T, C> where T: Clone, C: Clone + Compare<T> {
    fn clone(&self) -> UnbalancedTree<T, C> {
        UnbalancedTree { root: self.root.clone(), mods: ModCount::new(), cmp: self.cmp.clone() }
    }
}

impl<T, C> Debug for UnbalancedTree<T, C> where T: Debug, C: Compare<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        node::fmt_in_order(self.root.as_deref(), f)
    }
}

impl<T, C> Default for UnbalancedTree<T, C> where C: Compare<T> + Default {
    fn default() -> UnbalancedTree<T, C> { UnbalancedTree::with_cmp(Default::default()) }
}

impl<T, C> Drop for UnbalancedTree<T, C> where C: Compare<T> {
    fn drop(&mut self) { self.mods.bump(); }
}

impl<T, C> Extend<T> for UnbalancedTree<T, C> where C: Compare<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, it: I) {
        for value in it { self.insert(value); }
    }
}

impl<T, C> FromIterator<T> for UnbalancedTree<T, C> where C: Compare<T> + Default {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> UnbalancedTree<T, C> {
        let mut tree: UnbalancedTree<T, C> = Default::default();
        tree.extend(it);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a UnbalancedTree<T, C> where T: Clone, C: Compare<T> {
    type Item = T;
    type IntoIter = Iter<Node<T>>;
    fn into_iter(self) -> Iter<Node<T>> { self.iter() }
}

#[cfg(test)]
mod test {
    use super::UnbalancedTree;
    use crate::tree::BinaryTree;

    #[test]
    fn sorted_input_degenerates() {
        let n: usize = 1000;

        let mut tree = UnbalancedTree::new();
        for value in 0..n {
            tree.insert(value);
        }

        assert_eq!(tree.max_depth(), n);
        assert_eq!(tree.len(), n);
        assert!(tree.contains(&(n - 1)));
    }

    #[test]
    fn debug_renders_in_order() {
        let tree: UnbalancedTree<u32> = [2, 3, 1].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");

        let empty: UnbalancedTree<u32> = UnbalancedTree::new();
        assert_eq!(format!("{:?}", empty), "{}");
    }

    #[test]
    fn removal_shapes() {
        let mut tree = UnbalancedTree::new();
        for value in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(value);
        }

        assert!(tree.remove(&1)); // leaf
        assert!(tree.remove(&6)); // two children, successor copy-up
        assert!(tree.remove(&2)); // one child left
        assert!(!tree.remove(&6));

        assert_eq!(tree.iter().collect::<Vec<_>>(), [3, 4, 5, 7]);
    }
}
