//! Read-only views of single nodes, for introspection.

use super::ReferenceCounter;
use super::node::{Color, Node};
use super::{query, traverse};
use crate::comparator::Comparator;
use std::fmt;

/// A borrowed, read-only view of one node of an
/// [`ImmutableTree`](crate::ImmutableTree).
///
/// Views let a caller walk the balanced shape by hand through
/// [`left`](Self::left) and [`right`](Self::right). They carry the tree's
/// comparator so that searches within a subtree use the same order.
///
/// # Examples
///
/// ```rust
/// use immutable_tree::{Color, ImmutableTree};
///
/// let tree: ImmutableTree<i32> = (1..=5).collect();
/// let root = tree.root().unwrap();
/// assert_eq!(root.data(), &2);
/// assert_eq!(root.color(), Color::Black);
///
/// let right = root.right().unwrap();
/// assert_eq!(right.data(), &4);
/// assert_eq!(right.len(), 3);
/// assert_eq!(right.left().map(|view| *view.data()), Some(3));
/// ```
pub struct NodeView<'a, T, C> {
    node: &'a ReferenceCounter<Node<T>>,
    comparator: &'a C,
}

impl<'a, T, C> NodeView<'a, T, C> {
    pub(crate) const fn new(node: &'a ReferenceCounter<Node<T>>, comparator: &'a C) -> Self {
        Self { node, comparator }
    }

    /// Returns the color of this node.
    #[must_use]
    pub fn color(&self) -> Color {
        self.node.color
    }

    /// Returns the key stored in this node.
    #[must_use]
    pub fn data(&self) -> &'a T {
        &self.node.key
    }

    /// Returns the left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.node
            .left
            .as_ref()
            .map(|node| Self::new(node, self.comparator))
    }

    /// Returns the right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.node
            .right
            .as_ref()
            .map(|node| Self::new(node, self.comparator))
    }

    /// Number of keys in the subtree rooted here. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.node.size
    }

    /// Always `false`: a view points at an existing node.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Height of the subtree rooted here.
    #[must_use]
    pub fn height(&self) -> usize {
        query::height(Some(self.node))
    }

    /// Keys of the subtree rooted here, in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<&'a T> {
        traverse::in_order(Some(self.node), Vec::with_capacity(self.len()), &mut |mut keys, key| {
            keys.push(key);
            keys
        })
    }

    /// Searches the subtree rooted here.
    #[must_use]
    pub fn search(&self, key: &T) -> Option<&'a T>
    where
        C: Comparator<T>,
    {
        query::search(Some(self.node), key, self.comparator)
    }
}

impl<T, C> Clone for NodeView<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for NodeView<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for NodeView<'_, T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeView")
            .field("color", &self.node.color)
            .field("data", &self.node.key)
            .field("len", &self.node.size)
            .finish()
    }
}
