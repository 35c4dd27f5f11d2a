//! Cursor adaptors.
//!
//! Each adaptor owns the cursor of its upstream collection plus the shared
//! closure of the operation that created it. Adaptors pull from upstream
//! only when they are pulled themselves, and never after they have decided
//! to stop.

use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashSet;

use super::{Cursor, ReferenceCounter};
use crate::eager::{EagerCollection, IntoPairs, OrderedMap};
use crate::key::{Key, Pair};

// =============================================================================
// Sources
// =============================================================================

/// Turns a plain value iterator into pairs keyed `0, 1, 2, ..`.
pub(super) struct IndexedCursor<I> {
    values: I,
    position: usize,
}

impl<I> IndexedCursor<I> {
    pub(super) const fn new(values: I) -> Self {
        Self {
            values,
            position: 0,
        }
    }
}

impl<I: Iterator> Iterator for IndexedCursor<I> {
    type Item = Pair<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.next()?;
        let key = Key::Index(self.position);
        self.position += 1;
        Some((key, value))
    }
}

/// Runs a step function over a private copy of the seed state.
pub(super) struct GeneratorCursor<S, V, F> {
    state: S,
    step: ReferenceCounter<F>,
    position: usize,
    _output: PhantomData<fn() -> V>,
}

impl<S, V, F> GeneratorCursor<S, V, F> {
    pub(super) const fn new(state: S, step: ReferenceCounter<F>) -> Self {
        Self {
            state,
            step,
            position: 0,
            _output: PhantomData,
        }
    }
}

impl<S, V, F> Iterator for GeneratorCursor<S, V, F>
where
    F: Fn(&mut S) -> Option<V>,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = (self.step)(&mut self.state)?;
        let key = Key::Index(self.position);
        self.position += 1;
        Some((key, value))
    }
}

/// Walks a shared snapshot of an eager collection.
pub(super) struct SnapshotCursor<V> {
    snapshot: ReferenceCounter<EagerCollection<V>>,
    position: usize,
}

impl<V> SnapshotCursor<V> {
    pub(super) const fn new(snapshot: ReferenceCounter<EagerCollection<V>>) -> Self {
        Self {
            snapshot,
            position: 0,
        }
    }
}

impl<V: Clone> Iterator for SnapshotCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.snapshot.entries.entry_at(self.position)?.clone();
        self.position += 1;
        Some(pair)
    }
}

// =============================================================================
// Transformations
// =============================================================================

pub(super) struct MapCursor<V, U, F> {
    upstream: Cursor<V>,
    function: ReferenceCounter<F>,
    _output: PhantomData<fn() -> U>,
}

impl<V, U, F> MapCursor<V, U, F> {
    pub(super) const fn new(upstream: Cursor<V>, function: ReferenceCounter<F>) -> Self {
        Self {
            upstream,
            function,
            _output: PhantomData,
        }
    }
}

impl<V, U, F> Iterator for MapCursor<V, U, F>
where
    F: Fn(V, &Key) -> U,
{
    type Item = Pair<U>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.upstream.next()?;
        let mapped = (self.function)(value, &key);
        Some((key, mapped))
    }
}

pub(super) struct FilterCursor<V, P> {
    upstream: Cursor<V>,
    predicate: ReferenceCounter<P>,
}

impl<V, P> FilterCursor<V, P> {
    pub(super) const fn new(upstream: Cursor<V>, predicate: ReferenceCounter<P>) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<V, P> Iterator for FilterCursor<V, P>
where
    P: Fn(&V, &Key) -> bool,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.upstream.find(|(key, value)| predicate(value, key))
    }
}

/// Drops values already yielded by this cursor.
pub(super) struct UniqueCursor<V> {
    upstream: Cursor<V>,
    seen: FxHashSet<V>,
}

impl<V> UniqueCursor<V> {
    pub(super) fn new(upstream: Cursor<V>) -> Self {
        Self {
            upstream,
            seen: FxHashSet::default(),
        }
    }
}

impl<V> Iterator for UniqueCursor<V>
where
    V: Eq + Hash + Clone,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = &mut self.seen;
        self.upstream.find(|(_, value)| seen.insert(value.clone()))
    }
}

/// Calls a side-effecting function on every pulled element.
pub(super) struct TapCursor<V, F> {
    upstream: Cursor<V>,
    function: ReferenceCounter<F>,
}

impl<V, F> TapCursor<V, F> {
    pub(super) const fn new(upstream: Cursor<V>, function: ReferenceCounter<F>) -> Self {
        Self { upstream, function }
    }
}

impl<V, F> Iterator for TapCursor<V, F>
where
    F: Fn(&V, &Key),
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.upstream.next()?;
        (self.function)(&value, &key);
        Some((key, value))
    }
}

/// Renumbers keys `0, 1, 2, ..`.
pub(super) struct ValuesCursor<V> {
    upstream: Cursor<V>,
    position: usize,
}

impl<V> ValuesCursor<V> {
    pub(super) const fn new(upstream: Cursor<V>) -> Self {
        Self {
            upstream,
            position: 0,
        }
    }
}

impl<V> Iterator for ValuesCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.upstream.next()?;
        let key = Key::Index(self.position);
        self.position += 1;
        Some((key, value))
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// Yields at most `remaining` elements; never pulls past the bound.
pub(super) struct TakeCursor<V> {
    upstream: Cursor<V>,
    remaining: usize,
}

impl<V> TakeCursor<V> {
    pub(super) const fn new(upstream: Cursor<V>, remaining: usize) -> Self {
        Self {
            upstream,
            remaining,
        }
    }
}

impl<V> Iterator for TakeCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.upstream.next()
    }
}

pub(super) struct SkipCursor<V> {
    upstream: Cursor<V>,
    pending: usize,
}

impl<V> SkipCursor<V> {
    pub(super) const fn new(upstream: Cursor<V>, pending: usize) -> Self {
        Self { upstream, pending }
    }
}

impl<V> Iterator for SkipCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending > 0 {
            self.pending -= 1;
            self.upstream.next()?;
        }
        self.upstream.next()
    }
}

/// Yields while `predicate(value, key) == continue_on`, then stops for good.
///
/// `continue_on == true` is `take_while`; `false` is `take_until`. The
/// element that ends the run is pulled but not yielded.
pub(super) struct TakeWhileCursor<V, P> {
    upstream: Cursor<V>,
    predicate: ReferenceCounter<P>,
    continue_on: bool,
    stopped: bool,
}

impl<V, P> TakeWhileCursor<V, P> {
    pub(super) const fn new(
        upstream: Cursor<V>,
        predicate: ReferenceCounter<P>,
        continue_on: bool,
    ) -> Self {
        Self {
            upstream,
            predicate,
            continue_on,
            stopped: false,
        }
    }
}

impl<V, P> Iterator for TakeWhileCursor<V, P>
where
    P: Fn(&V, &Key) -> bool,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let (key, value) = self.upstream.next()?;
        if (self.predicate)(&value, &key) == self.continue_on {
            Some((key, value))
        } else {
            self.stopped = true;
            None
        }
    }
}

/// Drops elements while `predicate(value, key) == skip_on`, then yields
/// everything from the first element that breaks the run.
pub(super) struct SkipWhileCursor<V, P> {
    upstream: Cursor<V>,
    predicate: ReferenceCounter<P>,
    skip_on: bool,
    skipping: bool,
}

impl<V, P> SkipWhileCursor<V, P> {
    pub(super) const fn new(upstream: Cursor<V>, predicate: ReferenceCounter<P>, skip_on: bool) -> Self {
        Self {
            upstream,
            predicate,
            skip_on,
            skipping: true,
        }
    }
}

impl<V, P> Iterator for SkipWhileCursor<V, P>
where
    P: Fn(&V, &Key) -> bool,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.skipping {
            return self.upstream.next();
        }
        let predicate = &self.predicate;
        let skip_on = self.skip_on;
        let pair = self
            .upstream
            .find(|(key, value)| predicate(value, key) != skip_on)?;
        self.skipping = false;
        Some(pair)
    }
}

// =============================================================================
// Reshaping
// =============================================================================

/// Groups consecutive elements into eager chunks of `size`.
pub(super) struct ChunkCursor<V> {
    upstream: Cursor<V>,
    size: usize,
    position: usize,
}

impl<V> ChunkCursor<V> {
    pub(super) const fn new(upstream: Cursor<V>, size: usize) -> Self {
        Self {
            upstream,
            size,
            position: 0,
        }
    }
}

impl<V> Iterator for ChunkCursor<V> {
    type Item = Pair<EagerCollection<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: OrderedMap<V> = self.upstream.by_ref().take(self.size).collect();
        if chunk.is_empty() {
            return None;
        }
        let key = Key::Index(self.position);
        self.position += 1;
        Some((key, EagerCollection::from(chunk)))
    }
}

/// Appends pairs the way `concat` does: index keys continue after the
/// largest index seen so far, labels pass through.
#[derive(Default)]
struct IndexRenumbering {
    next_index: usize,
}

impl IndexRenumbering {
    fn observe(&mut self, key: &Key) {
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
    }

    fn assign(&mut self, key: Key) -> Key {
        match key {
            Key::Index(_) => {
                let assigned = Key::Index(self.next_index);
                self.next_index += 1;
                assigned
            }
            label @ Key::Label(_) => label,
        }
    }
}

pub(super) struct ConcatCursor<V> {
    first: Cursor<V>,
    second: Cursor<V>,
    first_exhausted: bool,
    renumbering: IndexRenumbering,
}

impl<V> ConcatCursor<V> {
    pub(super) fn new(first: Cursor<V>, second: Cursor<V>) -> Self {
        Self {
            first,
            second,
            first_exhausted: false,
            renumbering: IndexRenumbering::default(),
        }
    }
}

impl<V> Iterator for ConcatCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.first_exhausted {
            if let Some((key, value)) = self.first.next() {
                self.renumbering.observe(&key);
                return Some((key, value));
            }
            self.first_exhausted = true;
        }
        let (key, value) = self.second.next()?;
        Some((self.renumbering.assign(key), value))
    }
}

pub(super) struct FlatMapCursor<V, I: IntoPairs, F> {
    upstream: Cursor<V>,
    function: ReferenceCounter<F>,
    current: Option<Box<dyn Iterator<Item = Pair<I::Value>>>>,
    renumbering: IndexRenumbering,
}

impl<V, I: IntoPairs, F> FlatMapCursor<V, I, F> {
    pub(super) fn new(upstream: Cursor<V>, function: ReferenceCounter<F>) -> Self {
        Self {
            upstream,
            function,
            current: None,
            renumbering: IndexRenumbering::default(),
        }
    }
}

impl<V, I, F> Iterator for FlatMapCursor<V, I, F>
where
    I: IntoPairs + 'static,
    F: Fn(V, &Key) -> I,
{
    type Item = Pair<I::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some((key, value)) = current.next() {
                    return Some((self.renumbering.assign(key), value));
                }
                self.current = None;
            }
            let (key, value) = self.upstream.next()?;
            self.current = Some(Box::new((self.function)(value, &key).into_pairs()));
        }
    }
}

/// Pairs two cursors positionally; stops as soon as either side runs out.
pub(super) struct ZipCursor<V, W> {
    left: Cursor<V>,
    right: Cursor<W>,
    position: usize,
}

impl<V, W> ZipCursor<V, W> {
    pub(super) const fn new(left: Cursor<V>, right: Cursor<W>) -> Self {
        Self {
            left,
            right,
            position: 0,
        }
    }
}

impl<V, W> Iterator for ZipCursor<V, W> {
    type Item = Pair<(V, W)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, left) = self.left.next()?;
        let (_, right) = self.right.next()?;
        let key = Key::Index(self.position);
        self.position += 1;
        Some((key, (left, right)))
    }
}
