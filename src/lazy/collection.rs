//! The lazy collection type and its producers.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use super::adaptors::{
    ChunkCursor, ConcatCursor, FilterCursor, FlatMapCursor, GeneratorCursor, IndexedCursor,
    MapCursor, SkipCursor, SkipWhileCursor, SnapshotCursor, TakeCursor, TakeWhileCursor,
    TapCursor, UniqueCursor, ValuesCursor, ZipCursor,
};
use super::{BoxedCursor, Cursor, CursorFactory, ReferenceCounter};
use crate::eager::{
    EagerCollection, GroupResult, IntoPairs, KeySelector, Numeric, OrderedMap, Spread,
};
use crate::error::{EmptyCollectionError, InvalidArgumentError};
use crate::key::{Key, Pair, ToKey};

/// A restartable, pull-based sequence of keyed elements.
///
/// A `LazyCollection` holds a factory that builds a fresh producer for
/// every pass. Operations such as [`map`](Self::map) and
/// [`take`](Self::take) wrap that factory in another one and return
/// immediately; terminal operations such as [`to_vec`](Self::to_vec) open a
/// [`Cursor`] and pull only what they need.
///
/// Cloning is cheap: clones share the same factory.
///
/// # Examples
///
/// ```rust
/// use collectables::lazy::LazyCollection;
///
/// let collection = LazyCollection::make(|| {
///     let mut value = 0;
///     std::iter::from_fn(move || {
///         let current = value;
///         value += 1;
///         Some(current)
///     })
/// });
///
/// let result = collection.take(10);
/// assert_eq!(result.to_vec(), (0..10).collect::<Vec<_>>());
/// ```
pub struct LazyCollection<V> {
    source: ReferenceCounter<CursorFactory<V>>,
}

impl<V> LazyCollection<V> {
    /// Opens a new cursor. Nothing is produced until the cursor is pulled.
    ///
    /// A cursor yields pairs exactly as the pipeline produces them, so a
    /// label repeated by [`make_pairs`](Self::make_pairs) or
    /// [`concat`](Self::concat) is seen once per occurrence. Terminals that
    /// drain the collection collapse repeats the eager way: first position,
    /// last value.
    pub fn cursor(&self) -> Cursor<V> {
        Cursor::new(ReferenceCounter::clone(&self.source))
    }

    /// Alias for [`cursor`](Self::cursor), for use in `for` loops and
    /// iterator chains.
    pub fn iter(&self) -> Cursor<V> {
        self.cursor()
    }

    fn entries(&self) -> OrderedMap<V> {
        self.cursor().collect()
    }

    // =========================================================================
    // Short-circuiting terminals
    // =========================================================================

    /// Pulls a single element.
    pub fn first(&self) -> Option<V> {
        self.cursor().next().map(|(_, value)| value)
    }

    /// Pulls until an element satisfies `predicate`.
    pub fn first_where<P>(&self, mut predicate: P) -> Option<V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.cursor()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Pulls until an element equals `needle`. Never terminates on an
    /// unbounded collection that does not contain it.
    pub fn contains(&self, needle: &V) -> bool
    where
        V: PartialEq,
    {
        self.cursor().any(|(_, value)| value == *needle)
    }

    /// Pulls until an element satisfies `predicate`.
    pub fn contains_where<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.cursor().any(|(key, value)| predicate(&value, &key))
    }

    /// Pulls at most one element.
    pub fn is_empty(&self) -> bool {
        self.cursor().next().is_none()
    }

    /// Pulls at most one element.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    // =========================================================================
    // Draining terminals
    // =========================================================================

    /// Folds every element into an accumulator.
    pub fn reduce<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, V, &Key) -> B,
    {
        self.entries()
            .into_iter()
            .fold(initial, |accumulator, (key, value)| function(accumulator, value, &key))
    }

    /// Folds with the first element as the seed.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn reduce_first<F>(&self, mut function: F) -> Result<V, EmptyCollectionError>
    where
        F: FnMut(V, &V, &Key) -> V,
    {
        let mut entries = self.entries().into_iter();
        let (_, seed) = entries
            .next()
            .ok_or_else(|| EmptyCollectionError::new("reduce_first"))?;
        Ok(entries.fold(seed, |carry, (key, value)| function(carry, &value, &key)))
    }

    /// Counts the distinct keys by draining the collection.
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    /// Sums the elements; zero for an empty collection.
    ///
    /// # Panics
    ///
    /// Integer overflow panics in debug builds, as with `+`.
    pub fn sum(&self) -> V
    where
        V: Numeric,
    {
        self.reduce(V::ZERO, |total, value, _| total.add(value))
    }

    /// Arithmetic mean of the values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn avg(&self) -> Result<f64, EmptyCollectionError>
    where
        V: Numeric,
    {
        self.eager().avg()
    }

    /// Smallest value; the first one wins on ties.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn min(&self) -> Result<V, EmptyCollectionError>
    where
        V: PartialOrd + Clone,
    {
        self.eager().min()
    }

    /// Largest value; the first one wins on ties.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn max(&self) -> Result<V, EmptyCollectionError>
    where
        V: PartialOrd + Clone,
    {
        self.eager().max()
    }

    /// The value at the last position. Never terminates on an unbounded
    /// collection.
    pub fn last(&self) -> Option<V> {
        self.entries().pop().map(|(_, value)| value)
    }

    /// The value at the last position that satisfies `predicate`.
    pub fn last_where<P>(&self, mut predicate: P) -> Option<V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.entries()
            .into_iter()
            .rev()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Groups the elements by `selector`.
    ///
    /// Grouping needs every element, so this drains the collection.
    pub fn group_by(&self, selector: KeySelector<'_, V>) -> GroupResult<V>
    where
        V: Clone,
    {
        self.eager().group_by(selector)
    }

    /// Materializes the collection into an [`EagerCollection`].
    ///
    /// Never terminates on an unbounded collection.
    pub fn eager(&self) -> EagerCollection<V> {
        EagerCollection::from_entries(self.entries())
    }

    /// Materializes every pair in order, one per key.
    pub fn all(&self) -> Vec<Pair<V>> {
        self.entries().into_iter().collect()
    }

    /// Materializes every value in order, one per key.
    pub fn to_vec(&self) -> Vec<V> {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }
}

impl<V: 'static> LazyCollection<V> {
    pub(crate) fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> BoxedCursor<V> + 'static,
    {
        Self {
            source: ReferenceCounter::new(factory),
        }
    }

    // =========================================================================
    // Producers
    // =========================================================================

    /// Creates a collection from a factory of value iterators.
    ///
    /// The factory runs once per pass; the values it yields are keyed
    /// `0, 1, 2, ..`.
    pub fn make<I, F>(factory: F) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'static,
        F: Fn() -> I + 'static,
    {
        Self::from_factory(move || Box::new(IndexedCursor::new(factory().into_iter())))
    }

    /// Creates a collection from a factory of `(key, value)` iterators.
    pub fn make_pairs<K, I, F>(factory: F) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'static,
        F: Fn() -> I + 'static,
    {
        Self::from_factory(move || {
            Box::new(
                factory()
                    .into_iter()
                    .map(|(key, value)| -> Pair<V> { (key.into(), value) }),
            )
        })
    }

    /// Creates a collection by repeatedly applying `step` to a private
    /// copy of `seed`. The sequence ends when `step` returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::lazy::LazyCollection;
    ///
    /// let fibonacci = LazyCollection::generate((0u64, 1u64), |(current, next)| {
    ///     let value = *current;
    ///     (*current, *next) = (*next, *current + *next);
    ///     Some(value)
    /// });
    ///
    /// assert_eq!(fibonacci.take(7).to_vec(), vec![0, 1, 1, 2, 3, 5, 8]);
    /// ```
    pub fn generate<S, F>(seed: S, step: F) -> Self
    where
        S: Clone + 'static,
        F: Fn(&mut S) -> Option<V> + 'static,
    {
        let step = ReferenceCounter::new(step);
        Self::from_factory(move || {
            Box::new(GeneratorCursor::<S, V, F>::new(
                seed.clone(),
                ReferenceCounter::clone(&step),
            ))
        })
    }

    /// Calls `function` with `1..=count`.
    pub fn times<F>(count: usize, function: F) -> Self
    where
        F: Fn(usize) -> V + 'static,
    {
        let function = ReferenceCounter::new(function);
        Self::make(move || {
            let function = ReferenceCounter::clone(&function);
            (1..=count).map(move |number| function(number))
        })
    }

    /// Repeats `value` forever.
    pub fn repeat(value: V) -> Self
    where
        V: Clone,
    {
        Self::make(move || std::iter::repeat(value.clone()))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Transforms every element as it is pulled. Keys are kept.
    pub fn map<U, F>(&self, function: F) -> LazyCollection<U>
    where
        U: 'static,
        F: Fn(V, &Key) -> U + 'static,
    {
        let upstream = self.clone();
        let function = ReferenceCounter::new(function);
        LazyCollection::from_factory(move || {
            Box::new(MapCursor::<V, U, F>::new(
                upstream.cursor(),
                ReferenceCounter::clone(&function),
            ))
        })
    }

    /// Like [`map`](Self::map) for fallible transforms.
    ///
    /// Failures stay inside the elements until a consumer such as
    /// [`try_all`](LazyCollection::try_all) looks at them.
    pub fn try_map<U, E, F>(&self, function: F) -> LazyCollection<Result<U, E>>
    where
        U: 'static,
        E: 'static,
        F: Fn(V, &Key) -> Result<U, E> + 'static,
    {
        self.map(function)
    }

    /// Keeps the elements that satisfy `predicate`, keys intact.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        let upstream = self.clone();
        let predicate = ReferenceCounter::new(predicate);
        Self::from_factory(move || {
            Box::new(FilterCursor::new(
                upstream.cursor(),
                ReferenceCounter::clone(&predicate),
            ))
        })
    }

    /// Runs `function` on each element as it passes through.
    pub fn tap_each<F>(&self, function: F) -> Self
    where
        F: Fn(&V, &Key) + 'static,
    {
        let upstream = self.clone();
        let function = ReferenceCounter::new(function);
        Self::from_factory(move || {
            Box::new(TapCursor::new(
                upstream.cursor(),
                ReferenceCounter::clone(&function),
            ))
        })
    }

    /// Yields at most `count` elements.
    ///
    /// The upstream is pulled exactly `count` times at most, so this bounds
    /// an infinite producer.
    pub fn take(&self, count: usize) -> Self {
        let upstream = self.clone();
        Self::from_factory(move || Box::new(TakeCursor::new(upstream.cursor(), count)))
    }

    /// Drops the first `count` elements.
    pub fn skip(&self, count: usize) -> Self {
        let upstream = self.clone();
        Self::from_factory(move || Box::new(SkipCursor::new(upstream.cursor(), count)))
    }

    /// Yields elements until `predicate` first fails.
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        self.take_run(predicate, true)
    }

    /// Yields elements until `predicate` first holds.
    pub fn take_until<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        self.take_run(predicate, false)
    }

    fn take_run<P>(&self, predicate: P, continue_on: bool) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        let upstream = self.clone();
        let predicate = ReferenceCounter::new(predicate);
        Self::from_factory(move || {
            Box::new(TakeWhileCursor::new(
                upstream.cursor(),
                ReferenceCounter::clone(&predicate),
                continue_on,
            ))
        })
    }

    /// Drops elements while `predicate` holds.
    pub fn skip_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        self.skip_run(predicate, true)
    }

    /// Drops elements until `predicate` first holds.
    pub fn skip_until<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        self.skip_run(predicate, false)
    }

    fn skip_run<P>(&self, predicate: P, skip_on: bool) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        let upstream = self.clone();
        let predicate = ReferenceCounter::new(predicate);
        Self::from_factory(move || {
            Box::new(SkipWhileCursor::new(
                upstream.cursor(),
                ReferenceCounter::clone(&predicate),
                skip_on,
            ))
        })
    }

    /// Groups consecutive elements into eager chunks of `size`, keys kept
    /// inside each chunk.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if `size` is zero. The check happens
    /// here, before anything is pulled.
    pub fn chunk(&self, size: usize) -> Result<LazyCollection<EagerCollection<V>>, InvalidArgumentError> {
        if size == 0 {
            return Err(InvalidArgumentError::new(
                "chunk",
                "size must be greater than zero",
            ));
        }
        let upstream = self.clone();
        Ok(LazyCollection::from_factory(move || {
            Box::new(ChunkCursor::new(upstream.cursor(), size))
        }))
    }

    /// Maps every element to a collection-like value and flattens the
    /// results one level, pulling one inner collection at a time.
    pub fn flat_map<I, F>(&self, function: F) -> LazyCollection<I::Value>
    where
        I: IntoPairs + 'static,
        I::Value: 'static,
        F: Fn(V, &Key) -> I + 'static,
    {
        let upstream = self.clone();
        let function = ReferenceCounter::new(function);
        LazyCollection::from_factory(move || {
            Box::new(FlatMapCursor::<V, I, F>::new(
                upstream.cursor(),
                ReferenceCounter::clone(&function),
            ))
        })
    }

    /// Pairs elements positionally, stopping at the shorter side.
    pub fn zip<W: 'static>(&self, other: &LazyCollection<W>) -> LazyCollection<(V, W)> {
        let left = self.clone();
        let right = other.clone();
        LazyCollection::from_factory(move || {
            Box::new(ZipCursor::new(left.cursor(), right.cursor()))
        })
    }

    /// Yields the elements of `self`, then those of `other`.
    ///
    /// Index keys of `other` continue after the largest index seen in
    /// `self`; labels pass through unchanged.
    pub fn concat(&self, other: &Self) -> Self {
        let first = self.clone();
        let second = other.clone();
        Self::from_factory(move || Box::new(ConcatCursor::new(first.cursor(), second.cursor())))
    }

    /// Re-keys the elements `0, 1, 2, ..`.
    pub fn values(&self) -> Self {
        let upstream = self.clone();
        Self::from_factory(move || Box::new(ValuesCursor::new(upstream.cursor())))
    }

    /// Yields `length` elements starting at `offset`, keys untouched.
    /// Without a length the slice runs to the end.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Self {
        let skipped = self.skip(offset);
        match length {
            Some(length) => skipped.take(length),
            None => skipped,
        }
    }

    /// Drops repeated values as they stream past; the first occurrence and
    /// its key survive. Each pass remembers what it has yielded so far.
    pub fn unique(&self) -> Self
    where
        V: Eq + Hash + Clone,
    {
        let upstream = self.clone();
        Self::from_factory(move || Box::new(UniqueCursor::new(upstream.cursor())))
    }

    /// Converts every value with `U::from`, keeping keys.
    pub fn map_into<U>(&self) -> LazyCollection<U>
    where
        U: From<V> + 'static,
    {
        self.map(|value, _| U::from(value))
    }

    /// Maps every tuple value by spreading its fields into `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::lazy::LazyCollection;
    ///
    /// let names = LazyCollection::make(|| vec![("Iman", "Hasyim"), ("Azdy", "Fahmi")]);
    /// let full_names = names.map_spread(|first: &str, last: &str| format!("{first} {last}"));
    ///
    /// assert_eq!(full_names.to_vec(), vec!["Iman Hasyim", "Azdy Fahmi"]);
    /// ```
    pub fn map_spread<F, U>(&self, function: F) -> LazyCollection<U>
    where
        V: Spread<F, Output = U>,
        U: 'static,
        F: 'static,
    {
        let function = RefCell::new(function);
        self.map(move |value, _| value.spread(&mut *function.borrow_mut()))
    }

    /// Flattens one level of nesting with [`concat`](Self::concat) key rules.
    pub fn collapse(&self) -> LazyCollection<V::Value>
    where
        V: IntoPairs,
        V::Value: 'static,
    {
        self.flat_map(|value, _| value)
    }

    /// Uses the values of `self` as keys for the values of `other`, pairing
    /// them positionally.
    pub fn combine<W: 'static>(&self, other: &LazyCollection<W>) -> LazyCollection<W>
    where
        V: ToKey,
    {
        let keys = self.clone();
        let values = other.clone();
        LazyCollection::from_factory(move || {
            Box::new(
                ZipCursor::new(keys.cursor(), values.cursor())
                    .map(|(_, (key, value))| (key.to_key(), value)),
            )
        })
    }

    /// Splits into the elements that satisfy `predicate` and those that do
    /// not. Both halves stay lazy and keep their keys.
    pub fn partition<P>(&self, predicate: P) -> (Self, Self)
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        let accepted = ReferenceCounter::new(predicate);
        let rejected = ReferenceCounter::clone(&accepted);
        (
            self.filter(move |value, key| accepted(value, key)),
            self.filter(move |value, key| !rejected(value, key)),
        )
    }

    // =========================================================================
    // Reordering
    //
    // These need the whole upstream before they can yield anything. They
    // stay deferred: each pass drains the upstream and reorders it eagerly.
    // =========================================================================

    fn reordered<F>(&self, operation: F) -> Self
    where
        F: Fn(EagerCollection<V>) -> EagerCollection<V> + 'static,
    {
        let upstream = self.clone();
        Self::from_factory(move || Box::new(operation(upstream.eager()).into_iter()))
    }

    /// Yields the elements in reverse order, keys untouched.
    pub fn reverse(&self) -> Self
    where
        V: Clone,
    {
        self.reordered(|collection| collection.reverse())
    }

    /// Sorts by natural order, stable on ties.
    pub fn sort(&self) -> Self
    where
        V: Ord + Clone,
    {
        self.reordered(|collection| collection.sort())
    }

    /// Sorts by descending natural order, stable on ties.
    pub fn sort_desc(&self) -> Self
    where
        V: Ord + Clone,
    {
        self.reordered(|collection| collection.sort_desc())
    }

    /// Sorts with a comparator. Stable.
    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        V: Clone,
        F: Fn(&V, &V) -> Ordering + 'static,
    {
        self.reordered(move |collection| collection.sort_by(&compare))
    }

    /// Sorts by a derived key. Stable.
    pub fn sort_by_key<K, F>(&self, key_function: F) -> Self
    where
        V: Clone,
        K: Ord,
        F: Fn(&V) -> K + 'static,
    {
        self.reordered(move |collection| collection.sort_by_key(&key_function))
    }
}

impl LazyCollection<i64> {
    /// Counts from `start` to `end`, both inclusive. Counts down when
    /// `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::lazy::LazyCollection;
    ///
    /// assert_eq!(LazyCollection::range(1, 4).to_vec(), vec![1, 2, 3, 4]);
    /// assert_eq!(LazyCollection::range(3, 1).to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn range(start: i64, end: i64) -> Self {
        Self::make(move || -> Box<dyn Iterator<Item = i64>> {
            if start <= end {
                Box::new(start..=end)
            } else {
                Box::new((end..=start).rev())
            }
        })
    }

    /// Counts up from `start` without end.
    pub fn from_start(start: i64) -> Self {
        Self::make(move || start..)
    }
}

impl<V: 'static, E: 'static> LazyCollection<Result<V, E>> {
    /// Materializes the successful values, stopping at the first error.
    ///
    /// Nothing after the failing element is pulled, so no transform runs on
    /// it.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the pipeline.
    pub fn try_all(&self) -> Result<EagerCollection<V>, E> {
        let mut entries = OrderedMap::new();
        for (key, result) in self.cursor() {
            entries.insert(key, result?);
        }
        Ok(EagerCollection::from_entries(entries))
    }
}

impl<V> Clone for LazyCollection<V> {
    fn clone(&self) -> Self {
        Self {
            source: ReferenceCounter::clone(&self.source),
        }
    }
}

impl<V> fmt::Debug for LazyCollection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LazyCollection(..)")
    }
}

impl<'a, V> IntoIterator for &'a LazyCollection<V> {
    type Item = Pair<V>;
    type IntoIter = Cursor<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<V: Clone + 'static> From<EagerCollection<V>> for LazyCollection<V> {
    /// Wraps a snapshot; later changes to the original do not show through.
    fn from(collection: EagerCollection<V>) -> Self {
        let snapshot = ReferenceCounter::new(collection);
        Self::from_factory(move || {
            Box::new(SnapshotCursor::new(ReferenceCounter::clone(&snapshot)))
        })
    }
}

impl<V: Clone + 'static> EagerCollection<V> {
    /// Converts into a [`LazyCollection`] over a snapshot of the current
    /// elements.
    pub fn lazy(&self) -> LazyCollection<V> {
        LazyCollection::from(self.clone())
    }
}
