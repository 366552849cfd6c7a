//! Controller state and diagnostics.

use serde::{Deserialize, Serialize};

use super::window::Generation;

/// Lifecycle state of the delivery controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryState {
    /// Nothing pending.
    #[default]
    Idle,
    /// Building and delivering the initial window after a reset.
    Priming,
    /// Pending items remain and are delivered on consumption signals.
    Streaming,
}

/// Snapshot of controller counters.
///
/// Signal and batch counters accumulate over the controller's lifetime;
/// `cursor`, `pending` and `batch_size` describe the current generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub generation: Generation,
    pub state: DeliveryState,
    pub cursor: usize,
    pub pending: usize,
    pub batch_size: usize,

    /// Signals that sliced a batch.
    pub signals_processed: u64,
    /// Signals dropped as stale, busy, exhausted or debounced.
    pub signals_dropped: u64,
    /// Batches delivered in full.
    pub batches: u64,
    /// Append notifications sent, one per sub-batch.
    pub appends: u64,
    /// Reset notifications sent.
    pub resets: u64,
    /// Primes or batches abandoned because a reset superseded them.
    pub stale_aborts: u64,
    /// Delivered items whose resource resolved to a placeholder.
    pub placeholders: u64,
}

impl DeliveryStats {
    /// Fraction of the current list delivered so far.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.cursor + self.pending;
        if total == 0 {
            1.0
        } else {
            self.cursor as f64 / total as f64
        }
    }
}
