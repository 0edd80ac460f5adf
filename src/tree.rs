use crate::node::{self, Iter, ModCount, OrderedNode};

/// The operations shared by every tree in this crate.
///
/// `insert`, `remove` and `contains` are strategy-specific; the rest are
/// provided methods built on the [`OrderedNode`] contract alone, so they
/// behave identically no matter which balancing strategy produced the tree.
///
/// # Examples
///
/// ```
/// use bst::{BinaryTree, RedBlackTree, UnbalancedTree};
///
/// fn ascending<T: Clone, B: BinaryTree<T>>(tree: &B) -> Vec<T> {
///     tree.iter().collect()
/// }
///
/// let mut rb = RedBlackTree::new();
/// let mut plain = UnbalancedTree::new();
///
/// for value in [2, 3, 1] {
///     rb.insert(value);
///     plain.insert(value);
/// }
///
/// assert_eq!(ascending(&rb), [1, 2, 3]);
/// assert_eq!(ascending(&plain), [1, 2, 3]);
/// ```
pub trait BinaryTree<T> {
    /// The tree's concrete node type.
    type Node: OrderedNode<Value = T>;

    /// Returns a reference to the tree's root node, if any.
    fn root(&self) -> Option<&Self::Node>;

    /// Returns the tree's structural modification counter.
    fn mod_count(&self) -> &ModCount;

    /// Inserts a value into the tree.
    ///
    /// Returns `false` if the tree already contained an equal value; the
    /// existing value is kept and the tree is left unchanged.
    fn insert(&mut self, value: T) -> bool;

    /// Removes the given value from the tree.
    ///
    /// Returns `false` if the tree did not contain the value; removing an
    /// absent value is not an error and leaves the tree unchanged.
    fn remove(&mut self, value: &T) -> bool;

    /// Checks whether the tree contains the given value.
    fn contains(&self, value: &T) -> bool;

    /// Returns the number of values in the tree.
    ///
    /// Counted by full traversal: O(n), no cached length.
    fn len(&self) -> usize { node::size(self.root()) }

    /// Checks whether the tree is empty.
    fn is_empty(&self) -> bool { self.root().is_none() }

    /// Returns the greatest number of nodes on any root-to-leaf path, or 0
    /// for an empty tree.
    fn max_depth(&self) -> usize { node::max_depth(self.root()) }

    /// Returns a fail-fast iterator over the tree's values in ascending
    /// order.
    ///
    /// See [`Iter`] for the iterator's invalidation behavior.
    fn iter(&self) -> Iter<Self::Node> {
        Iter::new(self.root(), self.mod_count())
    }
}
