//! Incremental delivery of filtered results.
//!
//! ## Key Types
//!
//! - `DeliveryController`: Reset / signal-driven state machine
//! - `DeliveryConfig`: Window, batch and pacing parameters
//! - `ResultWindow` / `Generation`: Progress through one filtered list
//! - `BatchSizer`: Velocity-adaptive batch size with hysteresis
//! - `ConsumptionSignal` / `SignalOutcome`: Consumer position reports
//! - `ViewNotifier` / `Deliverable`: View-side boundary
//! - `DeliveryStats` / `DeliveryState`: Diagnostics
//!
//! The controller does not depend on the filter engine; any ordered
//! sequence of `Deliverable` items can be streamed.

pub mod batch;
pub mod config;
pub mod controller;
pub mod notifier;
pub mod signal;
pub mod stats;
pub mod window;

pub use batch::BatchSizer;
pub use config::DeliveryConfig;
pub use controller::DeliveryController;
pub use notifier::{Deliverable, ViewNotifier};
pub use signal::{ConsumptionSignal, SignalOutcome};
pub use stats::{DeliveryState, DeliveryStats};
pub use window::{Generation, ResultWindow};
