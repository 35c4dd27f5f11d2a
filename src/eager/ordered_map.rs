//! Insertion-ordered map with overwrite-in-place semantics.
//!
//! [`OrderedMap`] keeps entries in the order their key was *first* inserted.
//! Writing to an existing key replaces the value but keeps the position:
//!
//! ```text
//!   insert(a, 1)  insert(b, 2)  insert(a, 3)
//!   [a:1]         [a:1, b:2]    [a:3, b:2]
//! ```
//!
//! Index keys are handed out by [`OrderedMap::push`] from a counter that
//! always points one past the largest index ever stored, so indices are never
//! reused after removals.

use rustc_hash::FxHashMap;

use crate::key::{Key, Pair};

/// An insertion-ordered map from [`Key`] to `V`.
#[derive(Clone)]
pub struct OrderedMap<V> {
    entries: Vec<Pair<V>>,
    positions: FxHashMap<Key, usize>,
    next_index: usize,
}

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_index: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The index the next [`push`](Self::push) will use.
    #[inline]
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&V> {
        self.positions
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        self.positions
            .get(key)
            .copied()
            .map(move |position| &mut self.entries[position].1)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the entry at `position` in iteration order.
    #[inline]
    pub fn entry_at(&self, position: usize) -> Option<&Pair<V>> {
        self.entries.get(position)
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing key keeps its position and the previous value is returned.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        if let Some(&position) = self.positions.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Appends `value` under the next free index and returns that key.
    ///
    /// # Panics
    ///
    /// Panics if `usize::MAX` is already used as an index, since no index
    /// follows it.
    pub fn push(&mut self, value: V) -> Key {
        let key = Key::Index(self.next_index);
        assert!(
            self.next_index != usize::MAX || !self.positions.contains_key(&key),
            "cannot push: index usize::MAX is already occupied"
        );
        self.insert(key.clone(), value);
        key
    }

    /// Removes the entry stored under `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        let position = self.positions.remove(key)?;
        let (_, value) = self.entries.remove(position);
        self.reposition_from(position);
        Some(value)
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<Pair<V>> {
        let (key, value) = self.entries.pop()?;
        self.positions.remove(&key);
        Some((key, value))
    }

    /// Removes and returns the first entry.
    pub fn shift(&mut self) -> Option<Pair<V>> {
        if self.entries.is_empty() {
            return None;
        }
        let (key, value) = self.entries.remove(0);
        self.positions.remove(&key);
        self.reposition_from(0);
        Some((key, value))
    }

    /// Inserts `value` at the front and renumbers every index key from 0.
    ///
    /// Label keys are left untouched.
    pub fn prepend(&mut self, value: V) {
        let placeholder = Key::Index(0);
        self.entries.insert(0, (placeholder, value));
        let mut next_index = 0;
        for (key, _) in &mut self.entries {
            if key.is_index() {
                *key = Key::Index(next_index);
                next_index += 1;
            }
        }
        self.next_index = next_index;
        self.reposition_from(0);
    }

    /// Returns an iterator over the entries in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pair<V>> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Pair<V>] {
        &self.entries
    }

    /// Returns `true` if the keys are exactly `0, 1, .., len - 1` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(position, (key, _))| *key == Key::Index(position))
    }

    fn reposition_from(&mut self, start: usize) {
        if start == 0 {
            self.positions.clear();
        }
        for (position, (key, _)) in self.entries.iter().enumerate().skip(start) {
            self.positions.insert(key.clone(), position);
        }
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<V: std::fmt::Debug> std::fmt::Debug for OrderedMap<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<V> FromIterator<Pair<V>> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = Pair<V>>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> Extend<Pair<V>> for OrderedMap<V> {
    fn extend<I: IntoIterator<Item = Pair<V>>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = Pair<V>;
    type IntoIter = std::vec::IntoIter<Pair<V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = &'a Pair<V>;
    type IntoIter = std::slice::Iter<'a, Pair<V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
