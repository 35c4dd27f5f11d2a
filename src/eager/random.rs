//! Uniform random sampling.

use rand::Rng;
use rand::seq::index;

use super::{EagerCollection, OrderedMap};
use crate::error::InvalidArgumentError;

impl<V: Clone> EagerCollection<V> {
    /// Picks one element uniformly at random using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if the collection is empty.
    pub fn random(&self) -> Result<&V, InvalidArgumentError> {
        self.random_with(&mut rand::rng())
    }

    /// Picks one element uniformly at random using `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if the collection is empty.
    pub fn random_with<R>(&self, rng: &mut R) -> Result<&V, InvalidArgumentError>
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return Err(InvalidArgumentError::new(
                "random",
                "cannot sample from an empty collection",
            ));
        }
        let position = rng.random_range(0..self.len());
        self.entries
            .entry_at(position)
            .map(|(_, value)| value)
            .ok_or_else(|| InvalidArgumentError::new("random", "sampled position out of range"))
    }

    /// Picks `count` distinct elements without replacement.
    ///
    /// The picked pairs keep their keys and their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `count` exceeds the length.
    pub fn random_many(&self, count: usize) -> Result<Self, InvalidArgumentError> {
        self.random_many_with(count, &mut rand::rng())
    }

    /// Like [`random_many`](Self::random_many) with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `count` exceeds the length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let collection = collect![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// let sample = collection.random_many_with(5, &mut rng).unwrap();
    /// assert_eq!(sample.len(), 5);
    /// assert!(sample.iter().all(|(_, value)| collection.contains(value)));
    /// assert!(collection.random_many_with(11, &mut rng).is_err());
    /// ```
    pub fn random_many_with<R>(&self, count: usize, rng: &mut R) -> Result<Self, InvalidArgumentError>
    where
        R: Rng + ?Sized,
    {
        if count > self.len() {
            return Err(InvalidArgumentError::new(
                "random_many",
                format!(
                    "requested {count} items but only {} are available",
                    self.len()
                ),
            ));
        }
        let mut positions = index::sample(rng, self.len(), count).into_vec();
        positions.sort_unstable();
        Ok(positions
            .into_iter()
            .filter_map(|position| self.entries.entry_at(position).cloned())
            .collect::<OrderedMap<V>>()
            .into())
    }
}
