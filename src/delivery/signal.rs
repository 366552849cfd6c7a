//! Consumption-rate signals and their outcomes.

use std::time::Instant;

use super::window::Generation;

/// A position report from the consumer (typically a scroll offset).
///
/// Signals carry the generation of the list the consumer was looking at,
/// so reports that race a reset are recognized as stale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConsumptionSignal {
    pub generation: Generation,
    pub position: f64,
    pub at: Instant,
}

impl ConsumptionSignal {
    pub fn new(generation: Generation, position: f64, at: Instant) -> Self {
        Self {
            generation,
            position,
            at,
        }
    }
}

/// What the controller did with a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalOutcome {
    /// A batch was sliced and fully delivered.
    Delivered { items: usize, batch_size: usize },
    /// The initial window of a cancelled reset was re-sent as a reset.
    Primed { items: usize },
    /// A reset superseded the batch; `items` were delivered before it.
    Superseded { items: usize },
    /// The signal named an older generation.
    Stale,
    /// Nothing left to deliver.
    Exhausted,
    /// A batch or the priming window is already in flight.
    Busy,
    /// Arrived within the cooldown of the last processed signal.
    Debounced,
}

impl SignalOutcome {
    /// Whether the signal was processed (sliced a batch or re-primed).
    #[must_use]
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            SignalOutcome::Delivered { .. } | SignalOutcome::Primed { .. } | SignalOutcome::Superseded { .. }
        )
    }

    /// Items delivered as a result of this signal.
    #[must_use]
    pub fn delivered(&self) -> usize {
        match self {
            SignalOutcome::Delivered { items, .. }
            | SignalOutcome::Primed { items }
            | SignalOutcome::Superseded { items } => *items,
            _ => 0,
        }
    }
}
