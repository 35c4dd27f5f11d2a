//! # collectables
//!
//! Keyed collections with a fluent operation vocabulary, in an eager and a
//! lazy flavour.
//!
//! ## Overview
//!
//! - **Eager collections**: [`EagerCollection`](eager::EagerCollection) is a
//!   fully materialized, insertion-ordered sequence of `(key, value)` pairs.
//!   Keys are either integer indices or string labels. Transformations
//!   return new collections; a few named operations mutate in place.
//! - **Lazy collections**: [`LazyCollection`](lazy::LazyCollection) wraps a
//!   restartable producer. Operations compose producers and nothing runs
//!   until a terminal operation pulls, so unbounded sequences are fine as
//!   long as they are bounded before they are drained.
//! - **Grouping**: `group_by`, `map_to_groups`, `partition` and `count_by`
//!   over eager collections.
//!
//! Absent results are `Option::None`. Operations that cannot proceed return
//! [`EmptyCollectionError`](error::EmptyCollectionError) or
//! [`InvalidArgumentError`](error::InvalidArgumentError).
//!
//! ## Feature Flags
//!
//! - `eager`: Eager collections, grouping and combination helpers
//! - `lazy`: Lazy collections and producers (implies `eager`)
//! - `random`: Random sampling via `rand`
//! - `serde`: `Serialize`/`Deserialize` for keys and eager collections
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use collectables::prelude::*;
//!
//! let scores = collect!["Azdy" => 100, "Gibran" => 80, "Fahmi" => 95];
//! let passed = scores.filter(|score, _| *score >= 90);
//! assert_eq!(passed.keys().to_vec(), vec![Key::from("Azdy"), Key::from("Fahmi")]);
//!
//! let squares = LazyCollection::from_start(1).map(|value, _| value * value);
//! assert_eq!(squares.take(4).to_vec(), vec![1, 4, 9, 16]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the collection types, keys, errors and the `collect!` macro.
///
/// # Usage
///
/// ```rust
/// use collectables::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;
    pub use crate::key::*;

    #[cfg(feature = "eager")]
    pub use crate::collect;

    #[cfg(feature = "eager")]
    pub use crate::eager::*;

    #[cfg(feature = "lazy")]
    pub use crate::lazy::*;
}

pub mod error;
pub mod key;

#[cfg(feature = "eager")]
mod macros;

#[cfg(feature = "eager")]
pub mod eager;

#[cfg(feature = "lazy")]
pub mod lazy;
