//! Depth-first walks and the ascending iterator.
//!
//! Recursion depth is bounded by the tree height, which the red-black
//! invariants keep logarithmic.

use super::ReferenceCounter;
use super::node::Node;
use smallvec::SmallVec;
use std::iter::FusedIterator;

type NodeRef<'a, T> = Option<&'a ReferenceCounter<Node<T>>>;

/// Left, node, right: ascending key order.
pub(crate) fn in_order<'a, T, A, F>(node: NodeRef<'a, T>, accumulator: A, function: &mut F) -> A
where
    F: FnMut(A, &'a T) -> A,
{
    match node {
        None => accumulator,
        Some(node) => {
            let accumulator = in_order(node.left.as_ref(), accumulator, function);
            let accumulator = function(accumulator, &node.key);
            in_order(node.right.as_ref(), accumulator, function)
        }
    }
}

/// Right, node, left: descending key order.
pub(crate) fn reverse_order<'a, T, A, F>(
    node: NodeRef<'a, T>,
    accumulator: A,
    function: &mut F,
) -> A
where
    F: FnMut(A, &'a T) -> A,
{
    match node {
        None => accumulator,
        Some(node) => {
            let accumulator = reverse_order(node.right.as_ref(), accumulator, function);
            let accumulator = function(accumulator, &node.key);
            reverse_order(node.left.as_ref(), accumulator, function)
        }
    }
}

/// Node, left, right.
pub(crate) fn pre_order<'a, T, A, F>(node: NodeRef<'a, T>, accumulator: A, function: &mut F) -> A
where
    F: FnMut(A, &'a T) -> A,
{
    match node {
        None => accumulator,
        Some(node) => {
            let accumulator = function(accumulator, &node.key);
            let accumulator = pre_order(node.left.as_ref(), accumulator, function);
            pre_order(node.right.as_ref(), accumulator, function)
        }
    }
}

/// Left, right, node.
pub(crate) fn post_order<'a, T, A, F>(node: NodeRef<'a, T>, accumulator: A, function: &mut F) -> A
where
    F: FnMut(A, &'a T) -> A,
{
    match node {
        None => accumulator,
        Some(node) => {
            let accumulator = post_order(node.left.as_ref(), accumulator, function);
            let accumulator = post_order(node.right.as_ref(), accumulator, function);
            function(accumulator, &node.key)
        }
    }
}

/// Inline capacity of the iterator stack. A red-black tree of height 48
/// holds far more keys than fit in memory.
const STACK_CAPACITY: usize = 48;

/// An iterator over the keys of an [`ImmutableTree`](crate::ImmutableTree)
/// in ascending order.
///
/// Holds only the path to the next key, so it uses memory proportional to
/// the tree height.
pub struct Iter<'a, T> {
    stack: SmallVec<[&'a ReferenceCounter<Node<T>>; STACK_CAPACITY]>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: NodeRef<'a, T>) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: root.map_or(0, |node| node.size),
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: NodeRef<'a, T>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_ref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_ref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
