//! Property-based tests for ImmutableTree.
//!
//! These tests verify that ImmutableTree satisfies the expected laws
//! and invariants using proptest.

use immutable_tree::{ImmutableTree, NaturalOrder};
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Strategy for generating keys from a small domain so that duplicates,
/// hits and misses all occur.
fn keys(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-200..200i32, 0..max_size)
}

fn ascending(tree: &ImmutableTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

// =============================================================================
// Invariant Laws
// =============================================================================

proptest! {
    /// Law: every single insert yields a valid red-black tree.
    #[test]
    fn prop_insert_keeps_invariants(entries in keys(200)) {
        let mut tree = ImmutableTree::new();
        for key in entries {
            tree = tree.insert(key);
            prop_assert!(tree.check_invariants().is_ok());
        }
    }

    /// Law: every single remove yields a valid red-black tree.
    #[test]
    fn prop_remove_keeps_invariants(entries in keys(200), removals in keys(200)) {
        let mut tree = ImmutableTree::from_array(NaturalOrder, entries);
        for key in removals {
            tree = tree.remove(&key);
            prop_assert!(tree.check_invariants().is_ok());
        }
    }

    /// Law: update keeps the invariants whether or not the key is present.
    #[test]
    fn prop_update_keeps_invariants(entries in keys(100), old: i32, new: i32) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        prop_assert!(tree.update(&old, new).check_invariants().is_ok());
    }
}

// =============================================================================
// Content Laws
// =============================================================================

proptest! {
    /// Law: to_vec(from_array(xs)) is the sorted, deduplicated xs.
    #[test]
    fn prop_round_trip_sorts_and_deduplicates(entries in keys(100)) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries.clone());
        let expected: Vec<i32> = entries.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(ascending(&tree), expected);
    }

    /// Law: the contents do not depend on insertion order.
    #[test]
    fn prop_content_independent_of_order(entries in keys(100)) {
        let forward = ImmutableTree::from_array(NaturalOrder, entries.clone());
        let backward = ImmutableTree::from_array(NaturalOrder, entries.into_iter().rev());
        prop_assert_eq!(forward, backward);
    }

    /// Law: len matches the number of distinct keys.
    #[test]
    fn prop_len_counts_distinct(entries in keys(100)) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries.clone());
        let distinct = entries.into_iter().collect::<BTreeSet<_>>().len();
        prop_assert_eq!(tree.len(), distinct);
        prop_assert_eq!(tree.is_empty(), distinct == 0);
    }

    /// Law: fold_right visits the keys in reverse fold order.
    #[test]
    fn prop_fold_right_reverses_fold(entries in keys(100)) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let push = |mut keys: Vec<i32>, key: &i32| {
            keys.push(*key);
            keys
        };
        let mut forward = tree.fold(Vec::new(), push);
        forward.reverse();
        prop_assert_eq!(forward, tree.fold_right(Vec::new(), push));
    }

    /// Law: min and max are the ends of the ascending order.
    #[test]
    fn prop_min_max_are_ends(entries in keys(100)) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let keys = ascending(&tree);
        prop_assert_eq!(tree.min(), keys.first());
        prop_assert_eq!(tree.max(), keys.last());
    }

    /// Law: height stays within the red-black bound 2 * log2(n + 1).
    #[test]
    fn prop_height_is_logarithmic(entries in keys(300)) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let bound = 2.0 * ((tree.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
    }
}

// =============================================================================
// Search Laws
// =============================================================================

proptest! {
    /// Law: search after insert finds the key.
    /// tree.insert(key).search(&key) == Some(&key)
    #[test]
    fn prop_search_insert_law(entries in keys(100), key in -200..200i32) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let inserted = tree.insert(key);
        prop_assert_eq!(inserted.search(&key), Some(&key));
    }

    /// Law: search after remove finds nothing.
    /// tree.remove(&key).search(&key) == None
    #[test]
    fn prop_search_remove_law(entries in keys(100), key in -200..200i32) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let removed = tree.remove(&key);
        prop_assert_eq!(removed.search(&key), None);
    }

    /// Law: remove does not affect other keys.
    #[test]
    fn prop_remove_other_law(entries in keys(100), removed in -200..200i32, other in -200..200i32) {
        prop_assume!(removed != other);
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let remaining = tree.remove(&removed);
        prop_assert_eq!(remaining.search(&other), tree.search(&other));
    }

    /// Law: search_range equals the ascending filter of the contents.
    #[test]
    fn prop_search_range_is_filter(entries in keys(100), lower in -250..250i32, upper in -250..250i32) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        let found: Vec<i32> = tree.search_range(&lower, &upper).into_iter().copied().collect();
        let expected: Vec<i32> = ascending(&tree)
            .into_iter()
            .filter(|key| lower <= *key && *key <= upper)
            .collect();
        prop_assert_eq!(found, expected);
    }
}

// =============================================================================
// Persistence Laws
// =============================================================================

proptest! {
    /// Law: operations on a derived tree never change an earlier version.
    #[test]
    fn prop_earlier_versions_unchanged(
        entries in keys(100),
        inserted in keys(30),
        removed in keys(30),
    ) {
        let original = ImmutableTree::from_array(NaturalOrder, entries);
        let snapshot = ascending(&original);

        let mut derived = original.clone();
        for key in inserted {
            derived = derived.insert(key);
        }
        for key in &removed {
            derived = derived.remove(key);
            derived = derived.update(&(key + 1), key - 1);
        }

        prop_assert_eq!(ascending(&original), snapshot.clone());
        for key in &snapshot {
            prop_assert_eq!(original.search(key), Some(key));
        }
        prop_assert!(original.check_invariants().is_ok());
    }

    /// Law: a no-op operation returns the input tree by reference.
    #[test]
    fn prop_no_op_shares_root(entries in keys(100), key in -200..200i32) {
        let tree = ImmutableTree::from_array(NaturalOrder, entries);
        if tree.contains(&key) {
            prop_assert!(tree.insert(key).ptr_eq(&tree));
        } else {
            prop_assert!(tree.remove(&key).ptr_eq(&tree));
            prop_assert!(tree.update(&key, key).ptr_eq(&tree));
        }
    }
}
