//! The tree handle.

use super::ReferenceCounter;
use super::node::{Color, Link, blacken};
use super::traverse::Iter;
use super::view::NodeView;
use super::{delete, insert, invariant, query, traverse};
use crate::comparator::{Comparator, NaturalOrder};
use crate::tree::invariant::InvariantViolation;
use std::fmt;

/// A persistent (immutable) ordered collection based on a red-black tree.
///
/// Every operation that changes the contents returns a new tree. The
/// original stays valid and unchanged, and both share every subtree the
/// operation did not touch, so a new version costs O(log N) new nodes.
///
/// A tree is a pair of a root and a comparator. The comparator is fixed
/// when the empty tree is created and is shared by every version derived
/// from it.
///
/// # Time Complexity
///
/// | Operation            | Complexity   |
/// |----------------------|--------------|
/// | `insert`             | O(log N)     |
/// | `remove`             | O(log N)     |
/// | `update`             | O(log N)     |
/// | `search`             | O(log N)     |
/// | `search_range`       | O(log N + k) |
/// | `min`/`max`          | O(log N)     |
/// | `len`/`is_empty`     | O(1)         |
/// | `height`             | O(N)         |
/// | `fold`/`traverse_*`  | O(N)         |
///
/// # Examples
///
/// ```rust
/// use immutable_tree::ImmutableTree;
///
/// let tree = ImmutableTree::new().insert(3).insert(1).insert(2);
/// assert_eq!(tree.to_vec(), vec![&1, &2, &3]);
///
/// // Older versions are unaffected by later operations.
/// let smaller = tree.remove(&2);
/// assert_eq!(tree.len(), 3);
/// assert_eq!(smaller.to_vec(), vec![&1, &3]);
/// ```
pub struct ImmutableTree<T, C = NaturalOrder> {
    root: Link<T>,
    comparator: ReferenceCounter<C>,
}

impl<T: Ord> ImmutableTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = ImmutableTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> ImmutableTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let descending = ImmutableTree::with_comparator(|a: &i32, b: &i32| b.cmp(a))
    ///     .insert(1)
    ///     .insert(3)
    ///     .insert(2);
    /// assert_eq!(descending.to_vec(), vec![&3, &2, &1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator: ReferenceCounter::new(comparator),
        }
    }

    /// A new version sharing this tree's comparator.
    fn derive(&self, root: Link<T>) -> Self {
        Self {
            root,
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }

    /// Returns the comparator of this tree family.
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.size)
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = (1..=5).collect();
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(ImmutableTree::<i32>::new().height(), 0);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        query::height(self.root.as_ref())
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.root.as_ref().map(query::min)
    }

    /// Returns the largest key.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.root.as_ref().map(query::max)
    }

    /// Returns `true` if both trees share the same root node.
    ///
    /// Operations that leave a tree unchanged return a handle to the very
    /// same root, which this observes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = (1..=3).collect();
    /// assert!(tree.remove(&42).ptr_eq(&tree));
    /// assert!(!tree.remove(&2).ptr_eq(&tree));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_ref())
    }

    /// Returns the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(tree.to_vec(), vec![&10, &20, &30]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Folds the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [10, 20, 30].into_iter().collect();
    /// let joined = tree.fold(String::new(), |text, key| format!("{text}{key}"));
    /// assert_eq!(joined, "102030");
    /// ```
    pub fn fold<'a, A, F>(&'a self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        traverse::in_order(self.root.as_ref(), init, &mut function)
    }

    /// Same as [`fold`](Self::fold).
    pub fn fold_left<'a, A, F>(&'a self, init: A, function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        self.fold(init, function)
    }

    /// Folds the keys in descending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [10, 20, 30].into_iter().collect();
    /// let joined = tree.fold_right(String::new(), |text, key| format!("{text}{key}"));
    /// assert_eq!(joined, "302010");
    /// ```
    pub fn fold_right<'a, A, F>(&'a self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        traverse::reverse_order(self.root.as_ref(), init, &mut function)
    }

    /// Visits every key in order: left subtree, node, right subtree.
    pub fn traverse_in_order<'a, A, F>(&'a self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        traverse::in_order(self.root.as_ref(), init, &mut function)
    }

    /// Visits every key in pre-order: node, left subtree, right subtree.
    ///
    /// The order reflects the balanced shape, not the insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = (1..=5).collect();
    /// let visited = tree.traverse_pre_order(Vec::new(), |mut keys, key| {
    ///     keys.push(*key);
    ///     keys
    /// });
    /// assert_eq!(visited, vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn traverse_pre_order<'a, A, F>(&'a self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        traverse::pre_order(self.root.as_ref(), init, &mut function)
    }

    /// Visits every key in post-order: left subtree, right subtree, node.
    pub fn traverse_post_order<'a, A, F>(&'a self, init: A, mut function: F) -> A
    where
        F: FnMut(A, &'a T) -> A,
    {
        traverse::post_order(self.root.as_ref(), init, &mut function)
    }

    /// Returns a view of the root node.
    #[must_use]
    pub fn root(&self) -> Option<NodeView<'_, T, C>> {
        self.root
            .as_ref()
            .map(|node| NodeView::new(node, &*self.comparator))
    }

    /// Returns the color of the root node.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.root().map(|view| view.color())
    }

    /// Returns the key stored at the root.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.root.as_ref().map(|node| &node.key)
    }

    /// Returns a view of the root's left child.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(tree.data(), Some(&20));
    /// assert_eq!(tree.left().map(|view| *view.data()), Some(10));
    /// assert_eq!(tree.right().map(|view| *view.data()), Some(30));
    /// ```
    #[must_use]
    pub fn left(&self) -> Option<NodeView<'_, T, C>> {
        self.root().and_then(|view| view.left())
    }

    /// Returns a view of the root's right child.
    #[must_use]
    pub fn right(&self) -> Option<NodeView<'_, T, C>> {
        self.root().and_then(|view| view.right())
    }
}

impl<T, C: Comparator<T>> ImmutableTree<T, C> {
    /// Returns the stored key equal to `key` under the comparator.
    ///
    /// The stored key is returned, not `key`: with a comparator that only
    /// looks at part of a value, the result may differ from the probe.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn search(&self, key: &T) -> Option<&T> {
        query::search(self.root.as_ref(), key, &*self.comparator)
    }

    /// Like [`search`](Self::search), falling back to `default` on a miss.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [1, 2].into_iter().collect();
    /// assert_eq!(tree.search_or(&2, &0), &2);
    /// assert_eq!(tree.search_or(&5, &0), &0);
    /// ```
    #[must_use]
    pub fn search_or<'a>(&'a self, key: &T, default: &'a T) -> &'a T {
        self.search(key).unwrap_or(default)
    }

    /// Returns `true` if a key equal to `key` is stored.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    /// Returns every key `k` with `lower <= k <= upper`, ascending.
    ///
    /// Empty when `lower` is greater than `upper`.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the number of results
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = (1..=5).collect();
    /// assert_eq!(tree.search_range(&2, &5), vec![&2, &3, &4, &5]);
    /// assert!(tree.search_range(&-10, &-3).is_empty());
    /// ```
    #[must_use]
    pub fn search_range(&self, lower: &T, upper: &T) -> Vec<&T> {
        let mut output = Vec::new();
        query::collect_range(
            self.root.as_ref(),
            lower,
            upper,
            &*self.comparator,
            &mut output,
        );
        output
    }

    /// Verifies the red-black invariants, key order and cached sizes.
    ///
    /// Returns the black-height of the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found. Trees built only
    /// through this type's operations never produce one.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        invariant::check(self.root.as_ref(), &*self.comparator).inspect_err(|violation| {
            tracing::debug!(%violation, len = self.len(), "red-black invariant check failed");
        })
    }

    /// Returns `true` if [`check_invariants`](Self::check_invariants) passes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }
}

impl<T: Clone, C: Comparator<T>> ImmutableTree<T, C> {
    /// Builds a tree by inserting every element of `keys` in order.
    ///
    /// Later elements equal to an earlier one are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::{ImmutableTree, NaturalOrder};
    ///
    /// let tree = ImmutableTree::from_array(NaturalOrder, [3, 1, 2, 1]);
    /// assert_eq!(tree.to_vec(), vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn from_array<I>(comparator: C, keys: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let tree = keys
            .into_iter()
            .fold(Self::with_comparator(comparator), |tree, key| tree.insert(key));
        tracing::trace!(len = tree.len(), "built tree from array");
        tree
    }

    /// Returns a tree that also contains `key`.
    ///
    /// If an equal key is already stored, the tree is returned unchanged and
    /// shares its root with `self`; use [`update`](Self::update) to replace
    /// a stored key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree = ImmutableTree::new().insert(1).insert(2).insert(3);
    /// assert_eq!(tree.data(), Some(&2));
    ///
    /// let same = tree.insert(2);
    /// assert!(same.ptr_eq(&tree));
    /// ```
    #[must_use]
    pub fn insert(&self, key: T) -> Self {
        insert::insert(self.root.as_ref(), key, &*self.comparator)
            .map_or_else(|| self.clone(), |root| self.derive(blacken(root)))
    }

    /// Returns a tree without the key equal to `key`.
    ///
    /// If no such key is stored, the tree is returned unchanged and shares
    /// its root with `self`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::ImmutableTree;
    ///
    /// let tree: ImmutableTree<i32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(tree.remove(&10).to_vec(), vec![&20, &30]);
    /// assert_eq!(tree.remove(&100).to_vec(), vec![&10, &20, &30]);
    /// ```
    #[must_use]
    pub fn remove(&self, key: &T) -> Self {
        delete::remove(self.root.as_ref(), key, &*self.comparator)
            .map_or_else(|| self.clone(), |(root, _)| self.derive(blacken(root)))
    }

    /// Replaces the stored key equal to `old` with `new`.
    ///
    /// The stored key is removed and `new` is inserted into the result.
    /// `new` may compare equal to `old`, which swaps the payload of an entry
    /// whose comparator looks only at an identifier. When nothing equals
    /// `old`, the tree is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_tree::{ImmutableTree, by_key};
    ///
    /// let tree = ImmutableTree::from_array(by_key(|entry: &(u32, &'static str)| entry.0), [(3, "Chris")]);
    /// let updated = tree.update(&(3, "Chris"), (3, "Benjamin"));
    ///
    /// assert_eq!(updated.search(&(3, "")), Some(&(3, "Benjamin")));
    /// assert_eq!(tree.search(&(3, "")), Some(&(3, "Chris")));
    /// ```
    #[must_use]
    pub fn update(&self, old: &T, new: T) -> Self {
        match delete::remove(self.root.as_ref(), old, &*self.comparator) {
            Some((root, _)) => {
                tracing::trace!(len = self.len(), "update replaced stored key");
                self.derive(blacken(root)).insert(new)
            }
            None => {
                tracing::trace!(len = self.len(), "update found no stored key");
                self.clone()
            }
        }
    }
}

impl<T, C> Clone for ImmutableTree<T, C> {
    fn clone(&self) -> Self {
        self.derive(self.root.clone())
    }
}

impl<T, C: Default> Default for ImmutableTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Comparator<T> + Default> FromIterator<T> for ImmutableTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_array(C::default(), iter)
    }
}

impl<'a, T, C> IntoIterator for &'a ImmutableTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for ImmutableTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for ImmutableTree<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for ImmutableTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for ImmutableTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for key in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}")?;
        }
        write!(formatter, "}}")
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(ImmutableTree<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(ImmutableTree<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::by_key;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        id: u32,
        name: &'static str,
    }

    fn person(id: u32, name: &'static str) -> Person {
        Person { id, name }
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_tree() {
        let tree: ImmutableTree<i32> = ImmutableTree::new();
        assert_eq!(format!("{tree}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let tree: ImmutableTree<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{tree}"), "{1, 2, 3}");
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    }

    // =========================================================================
    // Handle Tests
    // =========================================================================

    #[rstest]
    fn test_default_is_empty() {
        let tree: ImmutableTree<i32> = ImmutableTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.color(), None);
        assert_eq!(tree.data(), None);
        assert!(tree.left().is_none());
        assert!(tree.right().is_none());
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[rstest]
    fn test_derived_versions_share_comparator() {
        let tree = ImmutableTree::with_comparator(by_key(|person: &Person| person.id));
        let derived = tree.insert(person(1, "Arjun")).insert(person(2, "Benjamin"));
        assert!(ReferenceCounter::ptr_eq(&tree.comparator, &derived.comparator));
        assert!(ReferenceCounter::ptr_eq(
            &tree.comparator,
            &derived.remove(&person(1, "")).comparator
        ));
    }

    #[rstest]
    fn test_len_tracks_insert_and_remove() {
        let tree: ImmutableTree<i32> = (1..=10).collect();
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.insert(5).len(), 10);
        assert_eq!(tree.insert(11).len(), 11);
        assert_eq!(tree.remove(&5).len(), 9);
        assert_eq!(tree.remove(&50).len(), 10);
    }

    #[rstest]
    fn test_update_absent_is_shared() {
        let tree: ImmutableTree<i32> = (1..=3).collect();
        assert!(tree.update(&9, 10).ptr_eq(&tree));
    }

    #[rstest]
    fn test_update_on_empty_tree() {
        let tree = ImmutableTree::with_comparator(by_key(|person: &Person| person.id));
        let updated = tree.update(&person(3, "Chris"), person(3, "Benjamin"));
        assert!(updated.is_empty());
    }

    #[rstest]
    fn test_update_into_occupied_key_drops_entry() {
        let tree: ImmutableTree<i32> = [1, 2, 3].into_iter().collect();
        let updated = tree.update(&1, 3);
        assert_eq!(updated.to_vec(), vec![&2, &3]);
        assert!(updated.is_valid());
    }

    #[rstest]
    fn test_eq_ignores_construction_order() {
        let ascending: ImmutableTree<i32> = (1..=20).collect();
        let descending: ImmutableTree<i32> = (1..=20).rev().collect();
        assert_eq!(ascending, descending);
        assert_ne!(ascending, ascending.remove(&7));
    }

    #[rstest]
    fn test_check_invariants_reports_black_height() {
        let tree: ImmutableTree<i32> = (1..=5).collect();
        assert_eq!(tree.check_invariants(), Ok(2));
        assert_eq!(ImmutableTree::<i32>::new().check_invariants(), Ok(0));
    }
}
