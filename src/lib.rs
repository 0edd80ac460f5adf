//! Self-balancing binary search trees.
//!
//! This crate provides two balanced ordered containers, [`AvlTree`] and
//! [`RedBlackTree`], together with [`UnbalancedTree`], a plain binary search
//! tree kept around as a baseline. All three expose the same [`BinaryTree`]
//! surface, and their read-only operations (search, in-order iteration, depth
//! measurement) are shared: they are written once against the [`OrderedNode`]
//! contract and work over any of the node shapes.
//!
//! Iterators are fail-fast: structurally modifying a tree invalidates its
//! outstanding iterators, which detect the change on their next step. See
//! [`node::Iter`] for details.

pub mod avl;
pub mod node;
pub mod rb;
pub mod unbalanced;

mod tree;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use crate::avl::AvlTree;
pub use crate::node::{Iter, ModCount, OrderedNode};
pub use crate::rb::RedBlackTree;
pub use crate::tree::BinaryTree;
pub use crate::unbalanced::UnbalancedTree;
