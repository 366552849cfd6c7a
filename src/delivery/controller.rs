//! The incremental delivery controller.
//!
//! Hands an ordered list to a view in pieces: one reset notification with
//! the initial window, then append notifications sized by how fast the
//! consumer is moving. Each piece is prefetched before it is delivered.
//!
//! ## State Machine
//!
//! ```text
//! Idle --reset--> Priming --initial window--> Streaming --queue drained--> Idle
//!   ^                                            |   ^
//!   +--------- reset is valid from any state ----+   +-- signal delivers a batch
//! ```
//!
//! ## Generations
//!
//! Every reset mints a new `Generation`. Queue, cursor and generation are
//! only touched while the state lock is held, and the lock is never held
//! across an await. After each prefetch the controller re-checks the
//! generation under the lock before delivering, so work started for a
//! superseded list is dropped on the floor instead of reaching the view.
//!
//! ## Pacing
//!
//! At most one batch is in flight per generation; signals arriving while
//! one is running are dropped, not queued. Processed signals are also
//! debounced by `DeliveryConfig::cooldown`. Every processed signal slices
//! at least `min_batch` items, so the queue always drains.
//!
//! ## Cancelled Resets
//!
//! A generation only streams appends once its initial window has gone out
//! through `on_reset`. If the `reset` future is dropped before that, the
//! controller stays in `Priming` and the next signal re-sends the initial
//! window as a reset instead of slicing a batch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use im::Vector;
use tracing::{debug, trace};

use super::batch::BatchSizer;
use super::config::DeliveryConfig;
use super::notifier::{Deliverable, ViewNotifier};
use super::signal::{ConsumptionSignal, SignalOutcome};
use super::stats::{DeliveryState, DeliveryStats};
use super::window::{Generation, ResultWindow};
use crate::error::ConfigError;
use crate::resources::{fetch_bounded, ResourceHandle, ResourcePrefetcher};

/// Streams ordered lists to a view with adaptive batching.
pub struct DeliveryController<T: Deliverable> {
    config: DeliveryConfig,
    prefetcher: Arc<dyn ResourcePrefetcher>,
    notifier: Arc<dyn ViewNotifier<T>>,
    inner: Mutex<Inner<T>>,
}

#[derive(Clone, Copy, Debug)]
struct LastSignal {
    at: Instant,
    position: f64,
}

struct Inner<T: Clone> {
    window: ResultWindow<T>,
    state: DeliveryState,
    /// The initial window of the current generation reached the view.
    primed: bool,
    in_flight: bool,
    sizer: BatchSizer,
    last_signal: Option<LastSignal>,
    stats: DeliveryStats,
}

/// Work a signal was admitted for.
enum Admitted<T: Clone> {
    /// Re-send the initial window of a generation whose reset was cancelled.
    Prime(Vec<T>),
    /// Deliver the next batch and the size it was sliced at.
    Batch(Vector<T>, usize),
}

impl<T: Clone> Inner<T> {
    /// Synchronous half of signal handling: decide whether to process and
    /// what to deliver.
    fn admit(
        &mut self,
        signal: &ConsumptionSignal,
        config: &DeliveryConfig,
    ) -> Result<Admitted<T>, SignalOutcome> {
        if signal.generation != self.window.generation() {
            return Err(SignalOutcome::Stale);
        }
        if self.in_flight {
            return Err(SignalOutcome::Busy);
        }
        if !self.primed {
            let initial = self
                .window
                .source()
                .iter()
                .take(config.initial_window_size)
                .cloned()
                .collect();
            self.in_flight = true;
            self.stats.signals_processed += 1;
            return Ok(Admitted::Prime(initial));
        }
        if self.window.is_exhausted() {
            return Err(SignalOutcome::Exhausted);
        }

        let previous = match self.last_signal {
            Some(last) => {
                if signal.at.saturating_duration_since(last.at) < config.cooldown {
                    return Err(SignalOutcome::Debounced);
                }
                last.position
            }
            None => 0.0,
        };

        let velocity = (signal.position - previous).abs();
        let batch_size = self.sizer.adapt(velocity);
        self.last_signal = Some(LastSignal {
            at: signal.at,
            position: signal.position,
        });
        self.in_flight = true;
        self.state = DeliveryState::Streaming;
        self.stats.signals_processed += 1;

        Ok(Admitted::Batch(self.window.peek(batch_size), batch_size))
    }

    /// End of in-flight work for the current generation.
    fn settle(&mut self) {
        self.in_flight = false;
        self.state = if self.window.is_exhausted() {
            DeliveryState::Idle
        } else {
            DeliveryState::Streaming
        };
    }

    fn attach(&mut self, items: &[T], handles: Vec<ResourceHandle>)
    where
        T: Deliverable,
    {
        for (item, handle) in items.iter().zip(handles) {
            if handle.is_placeholder() {
                self.stats.placeholders += 1;
            }
            item.attach_resource(handle);
        }
    }
}

/// Clears the in-flight flag if a reset or batch future is dropped before
/// it settles. Does nothing once the generation has moved on.
///
/// An unprimed generation stays in `Priming` so its initial window is
/// re-sent as a reset rather than streamed as appends.
///
/// Must be dropped after any `MutexGuard` on the same state.
struct FlightGuard<'a, T: Clone> {
    inner: &'a Mutex<Inner<T>>,
    generation: Generation,
}

impl<T: Clone> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.window.generation() != self.generation || !inner.in_flight {
            return;
        }
        if inner.primed {
            inner.settle();
        } else {
            inner.in_flight = false;
            inner.state = DeliveryState::Priming;
            debug!(generation = %self.generation, "reset cancelled before priming");
        }
    }
}

impl<T: Deliverable> DeliveryController<T> {
    /// Create a controller. Fails if the configuration is inconsistent.
    pub fn new(
        config: DeliveryConfig,
        prefetcher: Arc<dyn ResourcePrefetcher>,
        notifier: Arc<dyn ViewNotifier<T>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sizer = BatchSizer::new(&config);
        Ok(Self {
            config,
            prefetcher,
            notifier,
            inner: Mutex::new(Inner {
                window: ResultWindow::empty(),
                state: DeliveryState::Idle,
                primed: true,
                in_flight: false,
                sizer,
                last_signal: None,
                stats: DeliveryStats::default(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Generation of the current list.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.lock().window.generation()
    }

    #[must_use]
    pub fn state(&self) -> DeliveryState {
        self.lock().state
    }

    /// Items of the current list delivered so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.lock().window.cursor()
    }

    /// Items of the current list not yet delivered.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock().window.pending_len()
    }

    /// Batch size the last processed signal settled on.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.lock().sizer.size()
    }

    /// Snapshot of state and counters.
    #[must_use]
    pub fn stats(&self) -> DeliveryStats {
        let inner = self.lock();
        DeliveryStats {
            generation: inner.window.generation(),
            state: inner.state,
            cursor: inner.window.cursor(),
            pending: inner.window.pending_len(),
            batch_size: inner.sizer.size(),
            ..inner.stats.clone()
        }
    }

    /// Replace the list being delivered.
    ///
    /// Mints a new generation, prefetches the initial window and delivers
    /// it as a single `on_reset`. Any batch still in flight for an older
    /// generation is abandoned at its next generation check. Returns the
    /// generation consumers should tag their signals with.
    pub async fn reset<I>(&self, items: I) -> Generation
    where
        I: IntoIterator<Item = T>,
    {
        let source: Vector<T> = items.into_iter().collect();
        let total = source.len();

        let (generation, initial) = {
            let mut inner = self.lock();
            let generation = inner.window.generation().next();
            inner.window = ResultWindow::new(generation, source);
            inner.state = DeliveryState::Priming;
            inner.primed = false;
            inner.in_flight = true;
            inner.sizer.reset();
            inner.last_signal = None;
            let initial: Vec<T> = inner
                .window
                .peek(self.config.initial_window_size)
                .into_iter()
                .collect();
            (generation, initial)
        };
        debug!(%generation, total, initial = initial.len(), "reset");

        self.prime(generation, initial).await;
        generation
    }

    /// Handle a position report from the consumer.
    ///
    /// Either drops the signal (see `SignalOutcome`) or slices the next
    /// batch and delivers it in sub-batches of `sub_batch_width`, yielding
    /// to the scheduler between sub-batches. A generation whose reset was
    /// cancelled gets its initial window re-sent instead.
    pub async fn on_consumption_signal(&self, signal: ConsumptionSignal) -> SignalOutcome {
        let admitted = {
            let mut inner = self.lock();
            match inner.admit(&signal, &self.config) {
                Ok(admitted) => admitted,
                Err(outcome) => {
                    inner.stats.signals_dropped += 1;
                    trace!(?outcome, position = signal.position, "signal dropped");
                    return outcome;
                }
            }
        };
        let generation = signal.generation;

        let (batch, batch_size) = match admitted {
            Admitted::Prime(initial) => {
                let items = initial.len();
                debug!(%generation, items, "re-priming after cancelled reset");
                return if self.prime(generation, initial).await {
                    SignalOutcome::Primed { items }
                } else {
                    SignalOutcome::Superseded { items: 0 }
                };
            }
            Admitted::Batch(batch, batch_size) => (batch, batch_size),
        };
        let items: Vec<T> = batch.into_iter().collect();
        debug!(%generation, batch_size, sliced = items.len(), "batch admitted");

        let _flight = FlightGuard {
            inner: &self.inner,
            generation,
        };
        let mut delivered = 0;
        let mut sub_batches = items.chunks(self.config.sub_batch_width).peekable();

        while let Some(sub_batch) = sub_batches.next() {
            let handles = self.prefetch(sub_batch).await;
            let last = sub_batches.peek().is_none();
            {
                let mut inner = self.lock();
                if inner.window.generation() != generation {
                    inner.stats.stale_aborts += 1;
                    trace!(%generation, delivered, "batch superseded");
                    return SignalOutcome::Superseded { items: delivered };
                }
                inner.attach(sub_batch, handles);
                inner.window.advance(sub_batch.len());
                inner.stats.appends += 1;
                self.notifier.on_append(sub_batch);
                delivered += sub_batch.len();
                if last {
                    inner.stats.batches += 1;
                    inner.settle();
                }
            }
            if !last {
                tokio::task::yield_now().await;
            }
        }

        SignalOutcome::Delivered {
            items: delivered,
            batch_size,
        }
    }

    /// Prefetch the initial window of `generation` and deliver it as one
    /// `on_reset`. Returns false if a newer reset superseded it.
    async fn prime(&self, generation: Generation, initial: Vec<T>) -> bool {
        let _flight = FlightGuard {
            inner: &self.inner,
            generation,
        };
        let handles = self.prefetch(&initial).await;

        let mut inner = self.lock();
        if inner.window.generation() != generation {
            inner.stats.stale_aborts += 1;
            trace!(%generation, "initial window superseded");
            return false;
        }
        inner.attach(&initial, handles);
        inner.window.advance(initial.len());
        inner.stats.resets += 1;
        self.notifier.on_reset(&initial);
        inner.primed = true;
        inner.settle();
        true
    }

    async fn prefetch(&self, items: &[T]) -> Vec<ResourceHandle> {
        if items.is_empty() {
            return Vec::new();
        }
        let keys = items
            .iter()
            .map(|item| item.resource_key().to_owned())
            .collect();
        fetch_bounded(&self.prefetcher, keys, self.config.sub_batch_width).await
    }
}
