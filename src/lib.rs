//! # immutable-tree
//!
//! A persistent, immutable red-black tree.
//!
//! Every operation that changes a tree returns a new version. Previously
//! obtained versions remain valid and unchanged, and share all untouched
//! subtrees with the new version, so each change allocates only O(log N)
//! nodes.
//!
//! The order is given by a [`Comparator`] captured once when the empty tree
//! is created. Any `Fn(&T, &T) -> Ordering` is a comparator, and
//! [`NaturalOrder`] uses the element type's [`Ord`] implementation.
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes through `Arc` instead of `Rc`, making trees
//!   `Send + Sync` for thread-safe element and comparator types
//!
//! ## Example
//!
//! ```rust
//! use immutable_tree::{Color, ImmutableTree};
//!
//! let tree = ImmutableTree::new().insert(1).insert(2).insert(3);
//! assert_eq!(tree.to_vec(), vec![&1, &2, &3]);
//! assert_eq!(tree.data(), Some(&2));
//! assert_eq!(tree.color(), Some(Color::Black));
//!
//! let without_two = tree.remove(&2);
//! assert_eq!(without_two.to_vec(), vec![&1, &3]);
//! assert_eq!(tree.search(&2), Some(&2)); // Original unchanged
//!
//! assert_eq!(tree.search_range(&2, &5), vec![&2, &3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod comparator;
pub mod tree;

pub use comparator::{Comparator, NaturalOrder, by_key};
pub use tree::{Color, ImmutableTree, InvariantViolation, Iter, NodeView};
