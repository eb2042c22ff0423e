//! Red-black invariant checker.
//!
//! A diagnostic for tests and debugging. A failure here means the insertion
//! or deletion repair produced a malformed tree; it is never an expected
//! outcome of a tree operation.

use super::ReferenceCounter;
use super::node::{Node, is_red, subtree_size};
use crate::comparator::Comparator;
use std::cmp::Ordering;

/// A violated red-black tree invariant.
///
/// # Examples
///
/// ```rust
/// use immutable_tree::InvariantViolation;
///
/// let violation = InvariantViolation::BlackHeightMismatch { left: 2, right: 1 };
/// assert_eq!(
///     format!("{violation}"),
///     "black-height mismatch: left subtree has 2, right subtree has 1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root of a non-empty tree is red.
    RedRoot,
    /// A red node has a red child.
    RedChildOfRed,
    /// Two sibling subtrees have different black-heights.
    BlackHeightMismatch {
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// A key is not strictly between its ancestors' bounds.
    OrderViolation,
    /// A node's cached subtree size does not match its children.
    LengthMismatch {
        /// The size stored in the node.
        cached: usize,
        /// The size computed from the children.
        actual: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root node is red"),
            Self::RedChildOfRed => write!(formatter, "red node has a red child"),
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black-height mismatch: left subtree has {left}, right subtree has {right}"
            ),
            Self::OrderViolation => write!(formatter, "keys are not in strictly ascending order"),
            Self::LengthMismatch { cached, actual } => write!(
                formatter,
                "cached subtree size {cached} does not match actual size {actual}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks every invariant of the tree rooted at `root`.
///
/// Returns the black-height of the tree, not counting the empty sentinel.
pub(crate) fn check<T, C>(
    root: Option<&ReferenceCounter<Node<T>>>,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    C: Comparator<T> + ?Sized,
{
    if is_red(root) {
        return Err(InvariantViolation::RedRoot);
    }
    check_subtree(root, None, None, comparator)
}

/// Checks a subtree whose keys must lie strictly between `lower` and `upper`.
pub(crate) fn check_subtree<T, C>(
    node: Option<&ReferenceCounter<Node<T>>>,
    lower: Option<&T>,
    upper: Option<&T>,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    C: Comparator<T> + ?Sized,
{
    let Some(node) = node else {
        return Ok(0);
    };

    let above_lower =
        lower.is_none_or(|lower| comparator.compare(lower, &node.key) == Ordering::Less);
    let below_upper =
        upper.is_none_or(|upper| comparator.compare(&node.key, upper) == Ordering::Less);
    if !(above_lower && below_upper) {
        return Err(InvariantViolation::OrderViolation);
    }

    if node.is_red() && (is_red(node.left.as_ref()) || is_red(node.right.as_ref())) {
        return Err(InvariantViolation::RedChildOfRed);
    }

    let actual = 1 + subtree_size(node.left.as_ref()) + subtree_size(node.right.as_ref());
    if node.size != actual {
        return Err(InvariantViolation::LengthMismatch {
            cached: node.size,
            actual,
        });
    }

    let left = check_subtree(node.left.as_ref(), lower, Some(&node.key), comparator)?;
    let right = check_subtree(node.right.as_ref(), Some(&node.key), upper, comparator)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { left, right });
    }

    Ok(left + usize::from(!node.is_red()))
}
