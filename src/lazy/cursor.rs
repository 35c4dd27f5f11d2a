//! The per-iteration cursor of a lazy collection.
//!
//! A [`Cursor`] is the only thing that ever pulls a producer. It moves
//! through three phases:
//!
//! ```text
//!               first pull                 producer exhausted
//!  NotStarted ─────────────► Yielding ──────────────────────────► Done
//!                              │  ▲
//!                              └──┘ pull (element produced)
//! ```
//!
//! Creating a cursor runs nothing: the producer is built on the first pull.
//! Once `Done`, the cursor never touches its producer again.

use std::fmt;
use std::iter::FusedIterator;

use super::{BoxedCursor, CursorFactory, ReferenceCounter};
use crate::key::Pair;

/// Observable phase of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorPhase {
    /// No element has been requested yet.
    NotStarted,
    /// The producer is running and may yield more elements.
    Yielding,
    /// The producer is exhausted.
    Done,
}

enum CursorState<V> {
    NotStarted(ReferenceCounter<CursorFactory<V>>),
    Yielding { producer: BoxedCursor<V>, pulled: usize },
    Done,
}

/// A single pass over a lazy collection.
///
/// Obtained from [`LazyCollection::cursor`](super::LazyCollection::cursor).
/// Cursors are independent: advancing one never affects another.
pub struct Cursor<V> {
    state: CursorState<V>,
}

impl<V> Cursor<V> {
    pub(crate) const fn new(factory: ReferenceCounter<CursorFactory<V>>) -> Self {
        Self {
            state: CursorState::NotStarted(factory),
        }
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> CursorPhase {
        match self.state {
            CursorState::NotStarted(_) => CursorPhase::NotStarted,
            CursorState::Yielding { .. } => CursorPhase::Yielding,
            CursorState::Done => CursorPhase::Done,
        }
    }
}

impl<V> Iterator for Cursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                CursorState::NotStarted(factory) => {
                    let producer = factory();
                    tracing::trace!("lazy cursor started");
                    self.state = CursorState::Yielding {
                        producer,
                        pulled: 0,
                    };
                }
                CursorState::Yielding { producer, pulled } => {
                    if let Some(pair) = producer.next() {
                        *pulled += 1;
                        return Some(pair);
                    }
                    let pulled = *pulled;
                    tracing::trace!(pulled, "lazy cursor exhausted");
                    self.state = CursorState::Done;
                    return None;
                }
                CursorState::Done => return None,
            }
        }
    }
}

impl<V> FusedIterator for Cursor<V> {}

impl<V> fmt::Debug for Cursor<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("phase", &self.phase())
            .finish()
    }
}
