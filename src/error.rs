//! Error types for collection operations.
//!
//! Lookups that find nothing are not errors: they return `None`. The types
//! here cover the two ways an operation can refuse its input:
//!
//! - [`EmptyCollectionError`]: an aggregate or removal needs at least one
//!   element (`pop`, `shift`, `reduce_first`, `avg`, `min`, `max`).
//! - [`InvalidArgumentError`]: an argument is out of range (`chunk(0)`,
//!   `random_many(n)` with `n` larger than the collection).
//!
//! [`CollectionError`] unifies both so callers can use `?` across
//! operations.
//!
//! # Examples
//!
//! ```rust
//! use collectables::error::{CollectionError, EmptyCollectionError};
//!
//! let error = EmptyCollectionError::new("pop");
//! assert_eq!(error.to_string(), "pop: collection is empty");
//!
//! let unified: CollectionError = error.into();
//! assert_eq!(unified.operation(), "pop");
//! ```

use thiserror::Error;

/// An operation that needs at least one element was called on an empty
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: collection is empty")]
pub struct EmptyCollectionError {
    /// The operation that was rejected.
    pub operation: &'static str,
}

impl EmptyCollectionError {
    /// Creates a new `EmptyCollectionError` for `operation`.
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        tracing::debug!(operation, "rejected: collection is empty");
        Self { operation }
    }
}

/// An argument passed to an operation is outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: {message}")]
pub struct InvalidArgumentError {
    /// The operation that was rejected.
    pub operation: &'static str,
    /// What was wrong with the argument.
    pub message: String,
}

impl InvalidArgumentError {
    /// Creates a new `InvalidArgumentError` for `operation`.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(operation, %message, "rejected: invalid argument");
        Self { operation, message }
    }
}

/// Any error raised by a collection operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// See [`EmptyCollectionError`].
    #[error(transparent)]
    EmptyCollection(#[from] EmptyCollectionError),
    /// See [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),
}

impl CollectionError {
    /// The name of the operation that failed.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::EmptyCollection(error) => error.operation,
            Self::InvalidArgument(error) => error.operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_collection_error_display() {
        let error = EmptyCollectionError::new("avg");
        assert_eq!(error.to_string(), "avg: collection is empty");
    }

    #[rstest]
    fn test_invalid_argument_error_display() {
        let error = InvalidArgumentError::new("chunk", "size must be greater than zero");
        assert_eq!(error.to_string(), "chunk: size must be greater than zero");
    }

    #[rstest]
    fn test_collection_error_is_transparent() {
        let error: CollectionError = InvalidArgumentError::new("random_many", "too many").into();
        assert_eq!(error.to_string(), "random_many: too many");
        assert_eq!(error.operation(), "random_many");
    }

    #[rstest]
    fn test_collection_error_error_trait() {
        let error: CollectionError = EmptyCollectionError::new("max").into();
        let _: &dyn std::error::Error = &error;
    }
}
