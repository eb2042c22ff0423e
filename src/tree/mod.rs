//! Persistent red-black tree.
//!
//! The tree is split by concern:
//!
//! - `node`: the immutable node model
//! - `insert` / `delete`: the rebalancing engines, both path-copying
//! - `query` / `traverse`: read-only operations
//! - `invariant`: the red-black invariant checker
//! - [`ImmutableTree`]: the handle tying a root to its comparator
//! - [`NodeView`]: read-only access to individual nodes
//!
//! # Internal Structure
//!
//! Every reachable root satisfies:
//! 1. Keys are in strict order under the comparator
//! 2. The root is black
//! 3. The empty sentinel counts as black
//! 4. Red nodes have only black children
//! 5. Every path from a node to an empty sentinel below it passes the same
//!    number of black nodes
//!
//! These invariants keep the height within `2 * log2(N + 1)`.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer for shared nodes and comparators.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which lets
/// trees cross threads at a slightly higher cost.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod delete;
mod immutable_tree;
mod insert;
mod invariant;
mod node;
mod query;
mod traverse;
mod view;

pub use immutable_tree::ImmutableTree;
pub use invariant::InvariantViolation;
pub use node::Color;
pub use traverse::Iter;
pub use view::NodeView;
