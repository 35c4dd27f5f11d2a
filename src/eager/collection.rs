//! The eager, fully materialized collection.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use super::ordered_map::OrderedMap;
use crate::error::{EmptyCollectionError, InvalidArgumentError};
use crate::key::{Key, Pair};

/// An ordered, keyed collection whose elements are all in memory.
///
/// Elements are `(Key, V)` pairs in insertion order. Transformations borrow
/// the receiver and return a new collection with its own storage; only
/// [`push`](Self::push), [`pop`](Self::pop), [`put`](Self::put),
/// [`forget`](Self::forget), [`prepend`](Self::prepend) and
/// [`shift`](Self::shift) mutate in place.
///
/// # Examples
///
/// ```rust
/// use collectables::collect;
/// use collectables::key::Key;
///
/// let numbers = collect![1, 2, 3, 4, 5, 6];
/// let evens = numbers.filter(|value, _| value % 2 == 0);
///
/// assert_eq!(evens.to_vec(), vec![2, 4, 6]);
/// assert_eq!(evens.keys().to_vec(), vec![Key::Index(1), Key::Index(3), Key::Index(5)]);
/// assert_eq!(numbers.len(), 6);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct EagerCollection<V> {
    pub(crate) entries: OrderedMap<V>,
}

impl<V> EagerCollection<V> {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: OrderedMap::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: OrderedMap::with_capacity(capacity),
        }
    }

    /// Builds a collection from keyed pairs.
    ///
    /// A key that appears twice keeps its first position and its last value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::eager::EagerCollection;
    ///
    /// let scores = EagerCollection::from_pairs([("Azdy", 100), ("Gibran", 80), ("Azdy", 70)]);
    /// assert_eq!(scores.len(), 2);
    /// assert_eq!(scores.get("Azdy"), Some(&70));
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    pub(crate) const fn from_entries(entries: OrderedMap<V>) -> Self {
        Self { entries }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the collection has at least one element.
    #[inline]
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns an iterator over `(key, value)` pairs in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pair<V>> {
        self.entries.iter()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.entries.get(&key.into())
    }

    /// Returns `true` if `key` is present.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Appends `value` under the next free index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::eager::EagerCollection;
    ///
    /// let mut collection = EagerCollection::new();
    /// collection.push(1).push(2).push(3);
    ///
    /// assert_eq!(collection.pop(), Ok(3));
    /// assert_eq!(collection.to_vec(), vec![1, 2]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `usize::MAX` is already used as an index.
    pub fn push(&mut self, value: V) -> &mut Self {
        self.entries.push(value);
        self
    }

    /// Appends every value, in order, under the next free indices.
    ///
    /// # Panics
    ///
    /// Panics if `usize::MAX` is already used as an index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let mut collection = collect![1, 2, 3];
    /// collection.push_many([4, 5, 6]);
    ///
    /// assert_eq!(collection.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn push_many<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.entries.push(value);
        }
        self
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty; the
    /// collection is left untouched.
    pub fn pop(&mut self) -> Result<V, EmptyCollectionError> {
        self.entries
            .pop()
            .map(|(_, value)| value)
            .ok_or_else(|| EmptyCollectionError::new("pop"))
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn shift(&mut self) -> Result<V, EmptyCollectionError> {
        self.entries
            .shift()
            .map(|(_, value)| value)
            .ok_or_else(|| EmptyCollectionError::new("shift"))
    }

    /// Inserts `value` at the front, renumbering index keys from 0.
    pub fn prepend(&mut self, value: V) -> &mut Self {
        self.entries.prepend(value);
        self
    }

    /// Stores `value` under `key`, overwriting in place if the key exists.
    pub fn put(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Removes the element stored under `key` and returns it.
    pub fn forget(&mut self, key: impl Into<Key>) -> Option<V> {
        self.entries.remove(&key.into())
    }

    /// Returns the first element.
    #[inline]
    pub fn first(&self) -> Option<&V> {
        self.entries.iter().next().map(|(_, value)| value)
    }

    /// Returns the first element satisfying `predicate`.
    pub fn first_where<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries
            .iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Returns the last element.
    #[inline]
    pub fn last(&self) -> Option<&V> {
        self.entries.iter().next_back().map(|(_, value)| value)
    }

    /// Returns the last element satisfying `predicate`.
    pub fn last_where<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries
            .iter()
            .rev()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Returns `true` if any element equals `needle`.
    pub fn contains(&self, needle: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries.iter().any(|(_, value)| value == needle)
    }

    /// Returns `true` if `predicate` holds for any pair.
    pub fn contains_where<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries.iter().any(|(key, value)| predicate(value, key))
    }

    /// Visits pairs in order until `visitor` returns `false`.
    pub fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, &Key) -> bool,
    {
        for (key, value) in &self.entries {
            if !visitor(value, key) {
                break;
            }
        }
    }

    /// Left fold over the values in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let total = collect![1, 2, 3].reduce(10, |carry, value, _| carry + value);
    /// assert_eq!(total, 16);
    /// ```
    pub fn reduce<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, &V, &Key) -> B,
    {
        self.entries
            .iter()
            .fold(initial, |carry, (key, value)| function(carry, value, key))
    }

    /// Maps every value, keeping keys.
    pub fn map<U, F>(&self, mut function: F) -> EagerCollection<U>
    where
        F: FnMut(&V, &Key) -> U,
    {
        EagerCollection::from_entries(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), function(value, key)))
                .collect(),
        )
    }

    /// Returns the keys, re-indexed from 0.
    pub fn keys(&self) -> EagerCollection<Key> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }
}

impl<V: Clone> EagerCollection<V> {
    /// Returns the current pairs in order.
    pub fn all(&self) -> Vec<Pair<V>> {
        self.entries.as_slice().to_vec()
    }

    /// Returns the values in order, dropping keys.
    pub fn to_vec(&self) -> Vec<V> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns the values re-indexed from 0.
    pub fn values(&self) -> Self {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Folds with the first element as the seed.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let sum = collect![1, 2, 3, 4, 5, 6, 7, 8, 9].reduce_first(|carry, value, _| carry + value);
    /// assert_eq!(sum, Ok(45));
    /// ```
    pub fn reduce_first<F>(&self, mut function: F) -> Result<V, EmptyCollectionError>
    where
        F: FnMut(V, &V, &Key) -> V,
    {
        let mut entries = self.entries.iter();
        let (_, seed) = entries
            .next()
            .ok_or_else(|| EmptyCollectionError::new("reduce_first"))?;
        Ok(entries.fold(seed.clone(), |carry, (key, value)| {
            function(carry, value, key)
        }))
    }

    /// Converts every value with `U::from`, keeping keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// struct Person(String);
    ///
    /// impl From<&str> for Person {
    ///     fn from(name: &str) -> Self {
    ///         Self(name.to_string())
    ///     }
    /// }
    ///
    /// let people = collect!["Fahmi"].map_into::<Person>();
    /// assert_eq!(people.to_vec(), vec![Person("Fahmi".to_string())]);
    /// ```
    pub fn map_into<U>(&self) -> EagerCollection<U>
    where
        U: From<V>,
    {
        self.map(|value, _| U::from(value.clone()))
    }

    /// Keeps the pairs satisfying `predicate`, keys untouched.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries
            .iter()
            .filter(|(key, value)| predicate(value, key))
            .cloned()
            .collect::<OrderedMap<V>>()
            .into()
    }

    /// Returns `length` elements starting at `offset`, keys untouched.
    ///
    /// Without a length the slice runs to the end. An offset past the end
    /// yields an empty collection.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Self {
        self.entries
            .iter()
            .skip(offset)
            .take(length.unwrap_or(usize::MAX))
            .cloned()
            .collect::<OrderedMap<V>>()
            .into()
    }

    /// Returns the first `count` elements.
    #[inline]
    pub fn take(&self, count: usize) -> Self {
        self.slice(0, Some(count))
    }

    /// Returns everything after the first `count` elements.
    #[inline]
    pub fn skip(&self, count: usize) -> Self {
        self.slice(count, None)
    }

    /// Takes elements while `predicate` holds, stopping at the first failure.
    pub fn take_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries
            .iter()
            .take_while(|(key, value)| predicate(value, key))
            .cloned()
            .collect::<OrderedMap<V>>()
            .into()
    }

    /// Takes elements until `predicate` holds; the matching element is
    /// excluded.
    pub fn take_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.take_while(|value, key| !predicate(value, key))
    }

    /// Skips elements while `predicate` holds; the first failing element is
    /// kept.
    pub fn skip_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries
            .iter()
            .skip_while(|(key, value)| predicate(value, key))
            .cloned()
            .collect::<OrderedMap<V>>()
            .into()
    }

    /// Skips elements until `predicate` holds; the matching element is kept.
    pub fn skip_until<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.skip_while(|value, key| !predicate(value, key))
    }

    /// Splits into consecutive chunks of at most `size` elements.
    ///
    /// Keys are preserved inside each chunk; the chunks themselves are
    /// indexed from 0.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    ///
    /// let chunks = collect![1, 2, 3, 4, 5].chunk(2).unwrap();
    /// let sizes: Vec<usize> = chunks.iter().map(|(_, chunk)| chunk.len()).collect();
    /// assert_eq!(sizes, vec![2, 2, 1]);
    /// ```
    pub fn chunk(&self, size: usize) -> Result<EagerCollection<Self>, InvalidArgumentError> {
        if size == 0 {
            return Err(InvalidArgumentError::new(
                "chunk",
                "size must be greater than zero",
            ));
        }
        Ok(self
            .entries
            .as_slice()
            .chunks(size)
            .map(|chunk| Self::from_entries(chunk.iter().cloned().collect()))
            .collect())
    }

    /// Returns the elements in reverse order, keys untouched.
    pub fn reverse(&self) -> Self {
        self.entries
            .iter()
            .rev()
            .cloned()
            .collect::<OrderedMap<V>>()
            .into()
    }

    /// Drops repeated values; the first occurrence and its key survive.
    pub fn unique(&self) -> Self
    where
        V: Eq + Hash,
    {
        let mut seen = FxHashSet::default();
        self.filter(|value, _| seen.insert(value.clone()))
    }

    /// Sorts by natural order. Stable: equal values keep insertion order.
    /// Keys travel with their values.
    #[inline]
    pub fn sort(&self) -> Self
    where
        V: Ord,
    {
        self.sort_by(Ord::cmp)
    }

    /// Sorts by descending natural order, stable on ties.
    #[inline]
    pub fn sort_desc(&self) -> Self
    where
        V: Ord,
    {
        self.sort_by(|left, right| right.cmp(left))
    }

    /// Sorts with a comparator. Stable.
    pub fn sort_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut entries = self.all();
        entries.sort_by(|(_, left), (_, right)| compare(left, right));
        entries.into_iter().collect::<OrderedMap<V>>().into()
    }

    /// Sorts by a derived key. Stable.
    pub fn sort_by_key<K, F>(&self, mut key_function: F) -> Self
    where
        K: Ord,
        F: FnMut(&V) -> K,
    {
        self.sort_by(|left, right| key_function(left).cmp(&key_function(right)))
    }
}

impl<V> Default for EagerCollection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<OrderedMap<V>> for EagerCollection<V> {
    #[inline]
    fn from(entries: OrderedMap<V>) -> Self {
        Self::from_entries(entries)
    }
}

impl<V> From<Vec<V>> for EagerCollection<V> {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<V, const N: usize> From<[V; N]> for EagerCollection<V> {
    fn from(values: [V; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<V> FromIterator<V> for EagerCollection<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut collection = Self::with_capacity(iter.size_hint().0);
        collection.extend(iter);
        collection
    }
}

impl<V> Extend<V> for EagerCollection<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.entries.push(value);
        }
    }
}

impl<V> IntoIterator for EagerCollection<V> {
    type Item = Pair<V>;
    type IntoIter = std::vec::IntoIter<Pair<V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a EagerCollection<V> {
    type Item = &'a Pair<V>;
    type IntoIter = std::slice::Iter<'a, Pair<V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for EagerCollection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_list() {
            formatter
                .debug_list()
                .entries(self.entries.iter().map(|(_, value)| value))
                .finish()
        } else {
            fmt::Debug::fmt(&self.entries, formatter)
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for EagerCollection<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.entries.is_list() {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, value) in &self.entries {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in &self.entries {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(feature = "serde")]
struct EagerCollectionVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<'de, V> serde::de::Visitor<'de> for EagerCollectionVisitor<V>
where
    V: serde::Deserialize<'de>,
{
    type Value = EagerCollection<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence or a map")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut collection = EagerCollection::with_capacity(capacity);
        while let Some(value) = seq.next_element()? {
            collection.push(value);
        }
        Ok(collection)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut collection = EagerCollection::new();
        while let Some((key, value)) = map.next_entry::<Key, V>()? {
            collection.put(key, value);
        }
        Ok(collection)
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for EagerCollection<V>
where
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(EagerCollectionVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
