//! Combining collections: `zip`, `concat`, `combine`, `collapse`, `flat_map`.

use super::EagerCollection;
use crate::key::{Key, Pair, ToKey};

/// Collection-like values that can be flattened into keyed pairs.
///
/// Sequences (`Vec`, arrays) yield index keys; an [`EagerCollection`] yields
/// its own keys.
pub trait IntoPairs {
    /// The element type.
    type Value;

    /// Consumes `self` and yields its pairs in order.
    fn into_pairs(self) -> impl Iterator<Item = Pair<Self::Value>>;
}

impl<V> IntoPairs for EagerCollection<V> {
    type Value = V;

    fn into_pairs(self) -> impl Iterator<Item = Pair<V>> {
        self.into_iter()
    }
}

impl<V> IntoPairs for Vec<V> {
    type Value = V;

    fn into_pairs(self) -> impl Iterator<Item = Pair<V>> {
        self.into_iter()
            .enumerate()
            .map(|(index, value)| (Key::Index(index), value))
    }
}

impl<V, const N: usize> IntoPairs for [V; N] {
    type Value = V;

    fn into_pairs(self) -> impl Iterator<Item = Pair<V>> {
        self.into_iter()
            .enumerate()
            .map(|(index, value)| (Key::Index(index), value))
    }
}

impl<V> EagerCollection<V> {
    /// Appends `pairs`: index keys are renumbered after the current ones,
    /// labels overwrite in place.
    pub(crate) fn merge_pairs<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = Pair<V>>,
    {
        for (key, value) in pairs {
            match key {
                Key::Index(_) => {
                    self.entries.push(value);
                }
                label @ Key::Label(_) => {
                    self.entries.insert(label, value);
                }
            }
        }
    }
}

impl<V: Clone> EagerCollection<V> {
    /// Pairs elements positionally. The result is as long as the shorter
    /// input and is indexed from 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let zipped = collect![1, 2, 3].zip(&collect![4, 5, 6]);
    /// assert_eq!(zipped.to_vec(), vec![(1, 4), (2, 5), (3, 6)]);
    /// ```
    pub fn zip<W: Clone>(&self, other: &EagerCollection<W>) -> EagerCollection<(V, W)> {
        self.iter()
            .zip(other.iter())
            .map(|((_, left), (_, right))| (left.clone(), right.clone()))
            .collect()
    }

    /// Appends the values of `other` after the values of `self`.
    ///
    /// Index-keyed values of `other` get fresh indices; label-keyed values
    /// keep their label and overwrite an existing one in place.
    pub fn concat(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge_pairs(other.iter().cloned());
        result
    }

    /// Uses the values of `self` as keys for the values of `other`.
    ///
    /// Pairing is positional and stops at the shorter input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let person = collect!["name", "country"].combine(&collect!["Fahmi", "Indonesia"]);
    /// assert_eq!(person.get("name"), Some(&"Fahmi"));
    /// assert_eq!(person.get("country"), Some(&"Indonesia"));
    /// ```
    pub fn combine<W: Clone>(&self, other: &EagerCollection<W>) -> EagerCollection<W>
    where
        V: ToKey,
    {
        EagerCollection::from_pairs(
            self.iter()
                .zip(other.iter())
                .map(|((_, key), (_, value))| (key.to_key(), value.clone())),
        )
    }

    /// Flattens one level of nesting with [`concat`](Self::concat) semantics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let nested = collect![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];
    /// assert_eq!(nested.collapse().to_vec(), (1..=9).collect::<Vec<_>>());
    /// ```
    pub fn collapse(&self) -> EagerCollection<V::Value>
    where
        V: IntoPairs,
    {
        let mut result = EagerCollection::new();
        for (_, value) in self {
            result.merge_pairs(value.clone().into_pairs());
        }
        result
    }
}

impl<V> EagerCollection<V> {
    /// Maps every element to a collection-like value and flattens the
    /// results one level.
    pub fn flat_map<I, F>(&self, mut function: F) -> EagerCollection<I::Value>
    where
        I: IntoPairs,
        F: FnMut(&V, &Key) -> I,
    {
        let mut result = EagerCollection::new();
        for (key, value) in self {
            result.merge_pairs(function(value, key).into_pairs());
        }
        result
    }
}
