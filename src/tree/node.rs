//! Node model shared by every version of a tree.

use super::ReferenceCounter;

/// The color of a red-black tree node.
///
/// The empty sentinel has no color of its own and counts as black.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    /// A red node. Never the parent of another red node.
    Red,
    /// A black node. Counted by the black-height.
    Black,
}

impl std::fmt::Display for Color {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(formatter, "Red"),
            Self::Black => write!(formatter, "Black"),
        }
    }
}

/// A reference to a subtree; `None` is the empty sentinel.
pub(crate) type Link<T> = Option<ReferenceCounter<Node<T>>>;

/// An immutable tree node.
///
/// Nodes are never modified after construction. Rebalancing builds new
/// nodes and reuses untouched children by reference.
pub(crate) struct Node<T> {
    pub(crate) color: Color,
    pub(crate) key: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// Number of keys in this subtree, including this node.
    pub(crate) size: usize,
}

impl<T> Node<T> {
    pub(crate) fn new(color: Color, key: T, left: Link<T>, right: Link<T>) -> Self {
        let size = 1 + subtree_size(left.as_ref()) + subtree_size(right.as_ref());
        Self {
            color,
            key,
            left,
            right,
            size,
        }
    }

    /// A freshly inserted node: red, no children.
    pub(crate) const fn red_leaf(key: T) -> Self {
        Self {
            color: Color::Red,
            key,
            left: None,
            right: None,
            size: 1,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Copies this node with a different color, sharing both children.
    pub(crate) fn recolored(&self, color: Color) -> Self
    where
        T: Clone,
    {
        Self {
            color,
            key: self.key.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            size: self.size,
        }
    }

    /// Copies this node with a new left child.
    pub(crate) fn with_left(&self, left: Link<T>) -> Self
    where
        T: Clone,
    {
        Self::new(self.color, self.key.clone(), left, self.right.clone())
    }

    /// Copies this node with a new right child.
    pub(crate) fn with_right(&self, right: Link<T>) -> Self
    where
        T: Clone,
    {
        Self::new(self.color, self.key.clone(), self.left.clone(), right)
    }
}

/// Wraps a node into a shared link.
pub(crate) fn link<T>(node: Node<T>) -> Link<T> {
    Some(ReferenceCounter::new(node))
}

/// Red check that treats the empty sentinel as black.
pub(crate) fn is_red<T>(link: Option<&ReferenceCounter<Node<T>>>) -> bool {
    link.is_some_and(|node| node.is_red())
}

pub(crate) fn subtree_size<T>(link: Option<&ReferenceCounter<Node<T>>>) -> usize {
    link.map_or(0, |node| node.size)
}

/// Returns the link with a black root, copying the root only when it is red.
pub(crate) fn blacken<T: Clone>(link: Link<T>) -> Link<T> {
    match link {
        Some(node) if node.is_red() => self::link(node.recolored(Color::Black)),
        other => other,
    }
}
