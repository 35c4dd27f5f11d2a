//! Memoizing lazy collections.
//!
//! [`LazyCollection::remember`] shares a single upstream cursor between
//! every pass over the returned collection. Pairs are cached the first time
//! any pass pulls them; later passes (and passes running side by side) read
//! from the cache and only pull upstream for positions nobody has reached
//! yet.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use collectables::lazy::LazyCollection;
//!
//! let pulls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pulls);
//! let remembered = LazyCollection::from_start(0)
//!     .tap_each(move |_, _| counter.set(counter.get() + 1))
//!     .remember();
//!
//! assert_eq!(remembered.take(5).to_vec(), vec![0, 1, 2, 3, 4]);
//! assert_eq!(remembered.take(3).to_vec(), vec![0, 1, 2]);
//! assert_eq!(pulls.get(), 5);
//! ```

use std::cell::RefCell;

use super::{Cursor, CursorPhase, LazyCollection, ReferenceCounter};
use crate::key::Pair;

/// Upstream cursor plus everything it has produced so far.
struct RememberedSource<V> {
    upstream: Cursor<V>,
    produced: Vec<Pair<V>>,
}

impl<V: Clone> RememberedSource<V> {
    /// Returns the pair at `position`, pulling upstream only as far as
    /// needed.
    fn pair_at(&mut self, position: usize) -> Option<Pair<V>> {
        while self.produced.len() <= position {
            if self.upstream.phase() == CursorPhase::Done {
                return None;
            }
            match self.upstream.next() {
                Some(pair) => self.produced.push(pair),
                None => {
                    tracing::trace!(
                        remembered = self.produced.len(),
                        "remembered source exhausted"
                    );
                }
            }
        }
        self.produced.get(position).cloned()
    }
}

/// A pass over a remembered collection.
struct RememberCursor<V> {
    source: ReferenceCounter<RefCell<RememberedSource<V>>>,
    position: usize,
}

impl<V: Clone> Iterator for RememberCursor<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.source.borrow_mut().pair_at(self.position)?;
        self.position += 1;
        Some(pair)
    }
}

impl<V: Clone + 'static> LazyCollection<V> {
    /// Caches produced pairs so that no element is computed twice.
    ///
    /// The returned collection behaves like `self`, except that its
    /// upstream producer runs at most once per element across all passes.
    ///
    /// Pulling a remembered collection from inside its own upstream
    /// pipeline panics with a `RefCell` borrow error.
    pub fn remember(&self) -> Self {
        let source = ReferenceCounter::new(RefCell::new(RememberedSource {
            upstream: self.cursor(),
            produced: Vec::new(),
        }));
        Self::from_factory(move || {
            Box::new(RememberCursor {
                source: ReferenceCounter::clone(&source),
                position: 0,
            })
        })
    }
}
