//! Lazy, pull-based collections.
//!
//! A [`LazyCollection`] stores a *recipe* for producing keyed elements
//! rather than the elements themselves. Nothing runs until a terminal
//! operation (or a [`Cursor`]) pulls, and only as many elements are
//! produced as the consumer asks for. This makes infinite producers usable
//! as long as the pipeline is bounded before it is drained.
//!
//! Every pull starts from a fresh [`Cursor`], so a lazy collection can be
//! traversed any number of times. Use
//! [`remember`](LazyCollection::remember) when the producer is expensive
//! and its elements should be computed only once.
//!
//! # Examples
//!
//! ```rust
//! use collectables::lazy::LazyCollection;
//!
//! let naturals = LazyCollection::from_start(0);
//! let squares = naturals.map(|value, _| value * value).take(5);
//!
//! assert_eq!(squares.to_vec(), vec![0, 1, 4, 9, 16]);
//! // Restartable: a second pass produces the same elements.
//! assert_eq!(squares.to_vec(), vec![0, 1, 4, 9, 16]);
//! ```

mod adaptors;
mod collection;
mod cursor;
mod remember;

pub use collection::LazyCollection;
pub use cursor::{Cursor, CursorPhase};

use crate::key::Pair;

/// Shared ownership for producers and closures captured by lazy pipelines.
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// A type-erased producer of keyed elements.
pub(crate) type BoxedCursor<V> = Box<dyn Iterator<Item = Pair<V>>>;

/// Builds a fresh producer for each pass.
pub(crate) type CursorFactory<V> = dyn Fn() -> BoxedCursor<V>;
