//! Comparators defining the total order of a tree family.
//!
//! Every [`ImmutableTree`](crate::ImmutableTree) captures exactly one
//! comparator when it is created. All versions derived from that tree share
//! the same comparator instance, so the order can never change within a
//! family.
//!
//! A comparator must be a strict total order over the element type. Elements
//! that compare [`Ordering::Equal`] are treated as the same entry, which allows
//! comparators that look only at part of a value (an identifier, for example).
//!
//! # Examples
//!
//! ```rust
//! use immutable_tree::{Comparator, NaturalOrder, by_key};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//!
//! let descending = |left: &i32, right: &i32| right.cmp(left);
//! assert_eq!(descending.compare(&1, &2), Ordering::Greater);
//!
//! let by_length = by_key(|word: &&str| word.len());
//! assert_eq!(by_length.compare(&"abc", &"xyz"), Ordering::Equal);
//! ```

use std::cmp::Ordering;

/// A strict total order over `T`.
///
/// Implemented for every `Fn(&T, &T) -> Ordering`, so plain closures can be
/// used directly.
pub trait Comparator<T: ?Sized> {
    /// Compares two elements.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// The order given by the element type's [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Builds a comparator that orders elements by an extracted key.
///
/// Two elements with equal keys compare equal even if the rest of the
/// values differ.
///
/// # Examples
///
/// ```rust
/// use immutable_tree::{ImmutableTree, by_key};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Person {
///     id: u32,
///     name: &'static str,
/// }
///
/// let tree = ImmutableTree::with_comparator(by_key(|person: &Person| person.id))
///     .insert(Person { id: 2, name: "Benjamin" })
///     .insert(Person { id: 1, name: "Arjun" });
///
/// let probe = Person { id: 2, name: "" };
/// assert_eq!(tree.search(&probe).map(|person| person.name), Some("Benjamin"));
/// ```
pub fn by_key<T, K, F>(extract: F) -> impl Fn(&T, &T) -> Ordering + Clone
where
    K: Ord,
    F: Fn(&T) -> K + Clone,
{
    move |left: &T, right: &T| extract(left).cmp(&extract(right))
}
