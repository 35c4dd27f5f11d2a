//! Eager, fully materialized collections.
//!
//! This module provides [`EagerCollection`], an insertion-ordered keyed
//! container, together with its grouping and combination helpers:
//!
//! - [`OrderedMap`]: the backing store (first position, last value wins)
//! - [`KeySelector`] / [`Fields`]: how `group_by` and `count_by` pick keys
//! - [`GroupResult`]: a collection of collections keyed by group key
//! - [`IntoPairs`]: what `collapse` and `flat_map` can flatten
//! - [`Numeric`]: what `sum` and `avg` can aggregate
//! - [`Spread`]: what `map_spread` can destructure
//!
//! # Examples
//!
//! ```rust
//! use collectables::collect;
//!
//! let numbers = collect![3, 1, 2, 4, 8, 7, 6, 10, 5, 9];
//!
//! let top_three = numbers.sort_desc().take(3).values();
//! assert_eq!(top_three, collect![10, 9, 8]);
//!
//! let (small, large) = numbers.partition(|value, _| *value <= 5);
//! assert_eq!(small.len() + large.len(), numbers.len());
//!
//! assert_eq!(numbers.first_where(|value, _| *value > 5), Some(&8));
//! assert_eq!(numbers.first_where(|value, _| *value > 50), None);
//! ```

mod aggregate;
mod collection;
mod combine;
mod group;
mod ordered_map;
#[cfg(feature = "random")]
mod random;
mod spread;

pub use aggregate::Numeric;
pub use collection::EagerCollection;
pub use combine::IntoPairs;
pub use group::{Fields, GroupResult, KeySelector};
pub use ordered_map::OrderedMap;
pub use spread::Spread;
