//! Insertion with red-black repair under path copying.
//!
//! The new key is placed as a red leaf. On the way back up, every ancestor
//! is copied and checked as a grandparent of a possible red-red pair:
//!
//! - red uncle: recolor parent and uncle black, grandparent red, and let the
//!   next level up look again;
//! - black uncle: one or two rotations make the middle key a black subroot
//!   with two red children, which ends the repair.
//!
//! The caller blackens the final root.

use super::ReferenceCounter;
use super::node::{Color, Link, Node, is_red, link};
use crate::comparator::Comparator;
use std::cmp::Ordering;

/// Inserts `key` below `node`.
///
/// Returns `None` when an equal key is already stored; nothing is allocated
/// in that case.
pub(crate) fn insert<T, C>(
    node: Option<&ReferenceCounter<Node<T>>>,
    key: T,
    comparator: &C,
) -> Option<Link<T>>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let Some(node) = node else {
        return Some(link(Node::red_leaf(key)));
    };

    match comparator.compare(&key, &node.key) {
        Ordering::Less => {
            let left = insert(node.left.as_ref(), key, comparator)?;
            Some(repair_left(node.with_left(left)))
        }
        Ordering::Greater => {
            let right = insert(node.right.as_ref(), key, comparator)?;
            Some(repair_right(node.with_right(right)))
        }
        Ordering::Equal => None,
    }
}

/// Repairs a red-red pair in the left subtree of `grandparent`.
fn repair_left<T: Clone>(grandparent: Node<T>) -> Link<T> {
    let Some(parent) = grandparent.left.clone().filter(|parent| parent.is_red()) else {
        return link(grandparent);
    };

    if is_red(grandparent.right.as_ref()) {
        if !is_red(parent.left.as_ref()) && !is_red(parent.right.as_ref()) {
            return link(grandparent);
        }
        return recolor(grandparent);
    }

    if is_red(parent.left.as_ref()) {
        // Left-left: rotate right around the grandparent.
        let lowered = Node::new(
            Color::Red,
            grandparent.key,
            parent.right.clone(),
            grandparent.right,
        );
        return link(Node::new(
            Color::Black,
            parent.key.clone(),
            parent.left.clone(),
            link(lowered),
        ));
    }

    if let Some(child) = parent.right.as_ref().filter(|child| child.is_red()) {
        // Left-right: the inner grandchild becomes the subroot.
        let left = Node::new(
            Color::Red,
            parent.key.clone(),
            parent.left.clone(),
            child.left.clone(),
        );
        let right = Node::new(
            Color::Red,
            grandparent.key,
            child.right.clone(),
            grandparent.right,
        );
        return link(Node::new(
            Color::Black,
            child.key.clone(),
            link(left),
            link(right),
        ));
    }

    link(grandparent)
}

/// Mirror of [`repair_left`].
fn repair_right<T: Clone>(grandparent: Node<T>) -> Link<T> {
    let Some(parent) = grandparent.right.clone().filter(|parent| parent.is_red()) else {
        return link(grandparent);
    };

    if is_red(grandparent.left.as_ref()) {
        if !is_red(parent.left.as_ref()) && !is_red(parent.right.as_ref()) {
            return link(grandparent);
        }
        return recolor(grandparent);
    }

    if is_red(parent.right.as_ref()) {
        // Right-right: rotate left around the grandparent.
        let lowered = Node::new(
            Color::Red,
            grandparent.key,
            grandparent.left,
            parent.left.clone(),
        );
        return link(Node::new(
            Color::Black,
            parent.key.clone(),
            link(lowered),
            parent.right.clone(),
        ));
    }

    if let Some(child) = parent.left.as_ref().filter(|child| child.is_red()) {
        // Right-left: the inner grandchild becomes the subroot.
        let left = Node::new(
            Color::Red,
            grandparent.key,
            grandparent.left,
            child.left.clone(),
        );
        let right = Node::new(
            Color::Red,
            parent.key.clone(),
            child.right.clone(),
            parent.right.clone(),
        );
        return link(Node::new(
            Color::Black,
            child.key.clone(),
            link(left),
            link(right),
        ));
    }

    link(grandparent)
}

/// Red uncle case: pushes the red up one level.
fn recolor<T: Clone>(grandparent: Node<T>) -> Link<T> {
    let blacken_child = |child: Link<T>| child.and_then(|node| link(node.recolored(Color::Black)));
    link(Node::new(
        Color::Red,
        grandparent.key,
        blacken_child(grandparent.left),
        blacken_child(grandparent.right),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use crate::tree::node::blacken;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn build(keys: &[i32]) -> Link<i32> {
        keys.iter().fold(None, |root, &key| {
            insert(root.as_ref(), key, &NaturalOrder).map_or(root, blacken)
        })
    }

    fn shape(link: Option<&ReferenceCounter<Node<i32>>>) -> String {
        link.map_or_else(
            || ".".to_string(),
            |node| {
                let color = if node.is_red() { 'r' } else { 'b' };
                format!(
                    "({}{} {} {})",
                    node.key,
                    color,
                    shape(node.left.as_ref()),
                    shape(node.right.as_ref())
                )
            },
        )
    }

    #[rstest]
    fn test_insert_into_empty_is_red_leaf() {
        let root = insert::<i32, _>(None, 1, &NaturalOrder).flatten();
        assert!(is_red(root.as_ref()));
    }

    #[rstest]
    fn test_ascending_three_rotates_left() {
        let root = build(&[1, 2, 3]);
        assert_eq!(shape(root.as_ref()), "(2b (1r . .) (3r . .))");
    }

    #[rstest]
    fn test_descending_three_rotates_right() {
        let root = build(&[3, 2, 1]);
        assert_eq!(shape(root.as_ref()), "(2b (1r . .) (3r . .))");
    }

    #[rstest]
    #[case(&[1, 3, 2])]
    #[case(&[3, 1, 2])]
    fn test_zigzag_three_double_rotates(#[case] keys: &[i32]) {
        let root = build(keys);
        assert_eq!(shape(root.as_ref()), "(2b (1r . .) (3r . .))");
    }

    #[rstest]
    fn test_red_uncle_recolors() {
        let root = build(&[1, 2, 3, 4]);
        assert_eq!(shape(root.as_ref()), "(2b (1b . .) (3b . (4r . .)))");
    }

    #[rstest]
    fn test_five_ascending_shape() {
        let root = build(&[1, 2, 3, 4, 5]);
        assert_eq!(
            shape(root.as_ref()),
            "(2b (1b . .) (4b (3r . .) (5r . .)))"
        );
    }

    #[derive(Debug)]
    struct Tracked {
        key: i32,
        clones: Rc<Cell<usize>>,
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                key: self.key,
                clones: Rc::clone(&self.clones),
            }
        }
    }

    fn by_tracked_key(left: &Tracked, right: &Tracked) -> Ordering {
        left.key.cmp(&right.key)
    }

    #[rstest]
    #[case::left_left(&[3, 2], 1, 3)]
    #[case::left_right(&[3, 1], 2, 4)]
    #[case::right_right(&[1, 2], 3, 3)]
    #[case::right_left(&[1, 3], 2, 4)]
    fn test_rotation_clones_only_shared_keys(
        #[case] existing: &[i32],
        #[case] key: i32,
        #[case] expected_clones: usize,
    ) {
        let clones = Rc::new(Cell::new(0));
        let tracked = |key| Tracked {
            key,
            clones: Rc::clone(&clones),
        };
        let root = existing.iter().fold(None, |root: Link<Tracked>, &key| {
            insert(root.as_ref(), tracked(key), &by_tracked_key).map_or(root, blacken)
        });

        clones.set(0);
        let inserted = insert(root.as_ref(), tracked(key), &by_tracked_key).unwrap();
        assert_eq!(clones.get(), expected_clones);
        assert_eq!(inserted.as_ref().map(|node| node.key.key), Some(2));
    }

    #[rstest]
    fn test_duplicate_returns_none() {
        let root = build(&[1, 2, 3]);
        assert!(insert(root.as_ref(), 2, &NaturalOrder).is_none());
    }

    #[rstest]
    fn test_off_path_subtree_is_shared() {
        let root = build(&[1, 2, 3, 4, 5, 6, 7]);
        let root_node = root.as_ref().unwrap();
        let inserted = blacken(insert(root.as_ref(), 0, &NaturalOrder).unwrap());
        let inserted_node = inserted.as_ref().unwrap();
        assert_eq!(inserted_node.key, 2);
        assert!(ReferenceCounter::ptr_eq(
            root_node.right.as_ref().unwrap(),
            inserted_node.right.as_ref().unwrap()
        ));
    }
}
