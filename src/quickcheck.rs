use compare::Compare;
use quickcheck::{Arbitrary, Gen};

use crate::avl::AvlTree;
use crate::rb::RedBlackTree;
use crate::tree::BinaryTree;
use crate::unbalanced::UnbalancedTree;

macro_rules! arbitrary_tree {
    ($T:ident) => {
        impl<T, C> Arbitrary for $T<T, C>
            where T: Arbitrary + Clone, C: 'static + Clone + Compare<T> + Default {

            fn arbitrary(gen: &mut Gen) -> Self {
                Vec::<T>::arbitrary(gen).into_iter().collect()
            }

            fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
                let vec: Vec<T> = self.iter().collect();
                Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
            }
        }
    }
}

arbitrary_tree!(AvlTree);
arbitrary_tree!(RedBlackTree);
arbitrary_tree!(UnbalancedTree);
