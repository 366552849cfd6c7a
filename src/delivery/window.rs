//! Result windows and generation tokens.
//!
//! A `ResultWindow` is created for every reset and tracks how far delivery
//! has progressed through one filtered list. The list and the pending
//! suffix are `im::Vector`s, so peeking a batch or splitting off the
//! delivered prefix never copies the items themselves.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Identifies one filtered list handed to the controller.
///
/// Every reset mints a strictly greater generation. Work tagged with an
/// older generation is stale and must be discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The generation minted by the next reset.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// Delivery progress through one filtered list.
#[derive(Clone, Debug)]
pub struct ResultWindow<T: Clone> {
    generation: Generation,
    source: Vector<T>,
    pending: Vector<T>,
    cursor: usize,
}

impl<T: Clone> ResultWindow<T> {
    /// A fresh window with nothing delivered.
    pub fn new(generation: Generation, source: Vector<T>) -> Self {
        Self {
            generation,
            pending: source.clone(),
            source,
            cursor: 0,
        }
    }

    /// An empty window for generation 0, before any reset.
    pub fn empty() -> Self {
        Self::new(Generation::default(), Vector::new())
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The full list this window was created from.
    #[must_use]
    pub fn source(&self) -> &Vector<T> {
        &self.source
    }

    /// Number of items delivered so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Up to `count` items from the front of the pending queue.
    #[must_use]
    pub fn peek(&self, count: usize) -> Vector<T> {
        self.pending.take(count.min(self.pending.len()))
    }

    /// Mark up to `count` pending items as delivered.
    ///
    /// Returns how many items the cursor actually moved.
    pub fn advance(&mut self, count: usize) -> usize {
        let count = count.min(self.pending.len());
        self.pending = self.pending.skip(count);
        self.cursor += count;
        count
    }
}
