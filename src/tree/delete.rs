//! Deletion with double-black repair under path copying.
//!
//! Removing a black node leaves its side of the tree one black node short.
//! The recursion reports this as a `shortened` flag, and each ancestor on
//! the way up either absorbs the deficit or passes it on:
//!
//! - red sibling: rotate it above the parent, then repair the parent, which
//!   is now red and always absorbs the deficit;
//! - black sibling with two black children under a red parent: swap colors
//!   of parent and sibling;
//! - black sibling with two black children under a black parent: redden the
//!   sibling and pass the deficit to the grandparent;
//! - black sibling with a red near child: that child becomes the subroot;
//! - black sibling with a red far child: rotate the sibling above the parent.
//!
//! A deficit that reaches the root is simply dropped, since every path lost
//! the same black node. Only nodes on the search path, plus the few nodes
//! each rotation touches, are copied.

use super::ReferenceCounter;
use super::node::{Color, Link, Node, is_red, link};
use crate::comparator::Comparator;
use std::cmp::Ordering;

/// A rebuilt subtree and whether its black-height dropped by one.
type Removal<T> = (Link<T>, bool);

/// Removes the key equal to `key` from below `node`.
///
/// Returns `None` when no stored key compares equal; nothing is allocated in
/// that case.
pub(crate) fn remove<T, C>(
    node: Option<&ReferenceCounter<Node<T>>>,
    key: &T,
    comparator: &C,
) -> Option<Removal<T>>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let node = node?;

    match comparator.compare(key, &node.key) {
        Ordering::Less => {
            let (left, shortened) = remove(node.left.as_ref(), key, comparator)?;
            let rebuilt = node.with_left(left);
            Some(if shortened {
                repair_left(rebuilt)
            } else {
                (link(rebuilt), false)
            })
        }
        Ordering::Greater => {
            let (right, shortened) = remove(node.right.as_ref(), key, comparator)?;
            let rebuilt = node.with_right(right);
            Some(if shortened {
                repair_right(rebuilt)
            } else {
                (link(rebuilt), false)
            })
        }
        Ordering::Equal => Some(splice(node)),
    }
}

/// Removes `node` itself from its subtree.
fn splice<T: Clone>(node: &ReferenceCounter<Node<T>>) -> Removal<T> {
    match (&node.left, &node.right) {
        (None, None) => (None, !node.is_red()),
        (Some(child), None) | (None, Some(child)) => {
            // A lone child is a red leaf under a black parent; blackening it
            // keeps the black-height.
            debug_assert!(child.is_red() && !node.is_red());
            (link(child.recolored(Color::Black)), false)
        }
        (Some(_), Some(right)) => {
            let (right, shortened, successor) = remove_min(right);
            let rebuilt = Node::new(node.color, successor, node.left.clone(), right);
            if shortened {
                repair_right(rebuilt)
            } else {
                (link(rebuilt), false)
            }
        }
    }
}

/// Removes the leftmost node of a subtree and returns its key.
fn remove_min<T: Clone>(node: &ReferenceCounter<Node<T>>) -> (Link<T>, bool, T) {
    match &node.left {
        None => {
            let (rest, shortened) = splice(node);
            (rest, shortened, node.key.clone())
        }
        Some(left) => {
            let (left, shortened, minimum) = remove_min(left);
            let rebuilt = node.with_left(left);
            let (rebuilt, shortened) = if shortened {
                repair_left(rebuilt)
            } else {
                (link(rebuilt), false)
            };
            (rebuilt, shortened, minimum)
        }
    }
}

/// Restores the black-height of `parent` whose left subtree is one black
/// node short. A shortened subtree is always empty or black-rooted.
fn repair_left<T: Clone>(parent: Node<T>) -> Removal<T> {
    debug_assert!(!is_red(parent.left.as_ref()));

    // The longer side holds at least one black node, so the sibling exists.
    let Some(sibling) = parent.right.clone() else {
        return (link(parent), true);
    };

    if sibling.is_red() {
        let lowered = Node::new(
            Color::Red,
            parent.key,
            parent.left,
            sibling.left.clone(),
        );
        let (lowered, _) = repair_left(lowered);
        let raised = Node::new(Color::Black, sibling.key.clone(), lowered, sibling.right.clone());
        return (link(raised), false);
    }

    if is_red(sibling.right.as_ref()) {
        let far = sibling
            .right
            .as_ref()
            .and_then(|far| link(far.recolored(Color::Black)));
        let lowered = Node::new(
            Color::Black,
            parent.key,
            parent.left,
            sibling.left.clone(),
        );
        let raised = Node::new(parent.color, sibling.key.clone(), link(lowered), far);
        return (link(raised), false);
    }

    if let Some(near) = sibling.left.as_ref().filter(|near| near.is_red()) {
        let lowered = Node::new(Color::Black, parent.key, parent.left, near.left.clone());
        let sibling = Node::new(
            Color::Black,
            sibling.key.clone(),
            near.right.clone(),
            sibling.right.clone(),
        );
        let raised = Node::new(parent.color, near.key.clone(), link(lowered), link(sibling));
        return (link(raised), false);
    }

    let reddened = link(sibling.recolored(Color::Red));
    let still_short = !parent.is_red();
    let rebuilt = Node::new(Color::Black, parent.key, parent.left, reddened);
    (link(rebuilt), still_short)
}

/// Mirror of [`repair_left`].
fn repair_right<T: Clone>(parent: Node<T>) -> Removal<T> {
    debug_assert!(!is_red(parent.right.as_ref()));

    let Some(sibling) = parent.left.clone() else {
        return (link(parent), true);
    };

    if sibling.is_red() {
        let lowered = Node::new(
            Color::Red,
            parent.key,
            sibling.right.clone(),
            parent.right,
        );
        let (lowered, _) = repair_right(lowered);
        let raised = Node::new(Color::Black, sibling.key.clone(), sibling.left.clone(), lowered);
        return (link(raised), false);
    }

    if is_red(sibling.left.as_ref()) {
        let far = sibling
            .left
            .as_ref()
            .and_then(|far| link(far.recolored(Color::Black)));
        let lowered = Node::new(
            Color::Black,
            parent.key,
            sibling.right.clone(),
            parent.right,
        );
        let raised = Node::new(parent.color, sibling.key.clone(), far, link(lowered));
        return (link(raised), false);
    }

    if let Some(near) = sibling.right.as_ref().filter(|near| near.is_red()) {
        let lowered = Node::new(Color::Black, parent.key, near.right.clone(), parent.right);
        let sibling = Node::new(
            Color::Black,
            sibling.key.clone(),
            sibling.left.clone(),
            near.left.clone(),
        );
        let raised = Node::new(parent.color, near.key.clone(), link(sibling), link(lowered));
        return (link(raised), false);
    }

    let reddened = link(sibling.recolored(Color::Red));
    let still_short = !parent.is_red();
    let rebuilt = Node::new(Color::Black, parent.key, reddened, parent.right);
    (link(rebuilt), still_short)
}
