use super::{ModCount, OrderedNode};

/// A lazy in-order iterator over a tree's values, ascending.
///
/// The iterator keeps an explicit stack seeded with the tree's left spine;
/// each step pops a node, yields a clone of its value, and pushes the left
/// spine of the node's right child. It is single-use and not restartable.
///
/// # Fail-fast behavior
///
/// The iterator snapshots the tree's modification count when it is created
/// and compares it against the live count before every step. Structurally
/// modifying the tree (or dropping it) while an iterator is outstanding does
/// not fail at the point of mutation; the iterator's *next* call to
/// [`next`](Iterator::next) panics instead. The condition is not recoverable.
///
/// Exhaustion is not an error: once the tree has been fully visited, `next`
/// returns `None` and keeps returning `None`.
///
/// # Examples
///
/// ```
/// use bst::{AvlTree, BinaryTree};
///
/// let mut tree = AvlTree::new();
///
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// let mut it = tree.iter();
/// assert_eq!(it.next(), Some(1));
/// assert_eq!(it.next(), Some(2));
/// assert_eq!(it.next(), Some(3));
/// assert_eq!(it.next(), None);
/// ```
///
/// A mutation behind the iterator's back is detected on the next step:
///
/// ```should_panic
/// use bst::{AvlTree, BinaryTree};
///
/// let mut tree = AvlTree::new();
/// tree.insert("a");
///
/// let mut it = tree.iter();
/// tree.insert("b");
/// it.next(); // panics
/// ```
pub struct Iter<N> where N: OrderedNode {
    stack: Vec<*const N>,
    mods: ModCount,
    expected: u64,
}

impl<N> Iter<N> where N: OrderedNode {
    pub(crate) fn new(root: Option<&N>, mods: &ModCount) -> Iter<N> {
        let mut it = Iter { stack: vec![], mods: mods.watch(), expected: mods.value() };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut node: Option<&N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<N> Iterator for Iter<N> where N: OrderedNode, N::Value: Clone {
    type Item = N::Value;

    fn next(&mut self) -> Option<N::Value> {
        if self.mods.value() != self.expected {
            panic!("tree was structurally modified during iteration");
        }

        let node = self.stack.pop()?;

        // The count above matched the snapshot, so the tree has neither been
        // mutated nor dropped since this pointer was pushed: the node is
        // still owned by the tree, at the same address.
        let node = unsafe { &*node };

        self.push_left_spine(node.right());
        Some(node.value().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}
