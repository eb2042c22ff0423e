//! Read-only queries. None of these allocate nodes.

use super::ReferenceCounter;
use super::node::Node;
use crate::comparator::Comparator;
use std::cmp::Ordering;

/// Finds the stored key equal to `key`.
pub(crate) fn search<'a, T, C>(
    mut node: Option<&'a ReferenceCounter<Node<T>>>,
    key: &T,
    comparator: &C,
) -> Option<&'a T>
where
    C: Comparator<T> + ?Sized,
{
    while let Some(current) = node {
        node = match comparator.compare(key, &current.key) {
            Ordering::Less => current.left.as_ref(),
            Ordering::Greater => current.right.as_ref(),
            Ordering::Equal => return Some(&current.key),
        };
    }
    None
}

/// Collects every key `k` with `lower <= k <= upper` in ascending order.
///
/// Subtrees lying entirely outside the bounds are never visited.
pub(crate) fn collect_range<'a, T, C>(
    node: Option<&'a ReferenceCounter<Node<T>>>,
    lower: &T,
    upper: &T,
    comparator: &C,
    output: &mut Vec<&'a T>,
) where
    C: Comparator<T> + ?Sized,
{
    let Some(node) = node else {
        return;
    };

    let from_lower = comparator.compare(&node.key, lower);
    let to_upper = comparator.compare(&node.key, upper);

    if from_lower == Ordering::Greater {
        collect_range(node.left.as_ref(), lower, upper, comparator, output);
    }
    if from_lower != Ordering::Less && to_upper != Ordering::Greater {
        output.push(&node.key);
    }
    if to_upper == Ordering::Less {
        collect_range(node.right.as_ref(), lower, upper, comparator, output);
    }
}

pub(crate) fn min<T>(mut node: &ReferenceCounter<Node<T>>) -> &T {
    while let Some(left) = node.left.as_ref() {
        node = left;
    }
    &node.key
}

pub(crate) fn max<T>(mut node: &ReferenceCounter<Node<T>>) -> &T {
    while let Some(right) = node.right.as_ref() {
        node = right;
    }
    &node.key
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<T>(node: Option<&ReferenceCounter<Node<T>>>) -> usize {
    node.map_or(0, |node| {
        1 + height(node.left.as_ref()).max(height(node.right.as_ref()))
    })
}
