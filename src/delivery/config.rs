//! Delivery configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning for the incremental delivery controller.
///
/// The defaults were tuned by hand for a scrolling grid of card images.
/// Only the shape of the policy matters for correctness: batch size grows
/// by `grow_step` on fast scrolling, shrinks by `shrink_step` otherwise,
/// and always stays within `[min_batch, max_batch]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Items delivered by the reset notification.
    pub initial_window_size: usize,

    /// Batch size right after a reset.
    pub base_batch: usize,

    /// Lower bound for the adaptive batch size. Must be at least 1 so
    /// every processed signal makes progress.
    pub min_batch: usize,

    /// Upper bound for the adaptive batch size.
    pub max_batch: usize,

    /// Growth per fast signal.
    pub grow_step: usize,

    /// Shrink per slow signal. Usually smaller than `grow_step`.
    pub shrink_step: usize,

    /// Position delta above which a signal counts as fast.
    pub velocity_threshold: f64,

    /// Minimum time between processed signals.
    pub cooldown: Duration,

    /// Items per sub-batch, and the cap on concurrent prefetches.
    pub sub_batch_width: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            initial_window_size: 30,
            base_batch: 15,
            min_batch: 5,
            max_batch: 40,
            grow_step: 5,
            shrink_step: 2,
            velocity_threshold: 40.0,
            cooldown: Duration::from_millis(100),
            sub_batch_width: 5,
        }
    }
}

impl DeliveryConfig {
    /// Set the initial window size.
    pub fn with_initial_window(mut self, size: usize) -> Self {
        self.initial_window_size = size;
        self
    }

    /// Set base, min and max batch sizes.
    pub fn with_batch_bounds(mut self, base: usize, min: usize, max: usize) -> Self {
        self.base_batch = base;
        self.min_batch = min;
        self.max_batch = max;
        self
    }

    /// Set grow and shrink steps.
    pub fn with_steps(mut self, grow: usize, shrink: usize) -> Self {
        self.grow_step = grow;
        self.shrink_step = shrink;
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_sub_batch_width(mut self, width: usize) -> Self {
        self.sub_batch_width = width;
        self
    }

    /// Check the invariants the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_batch == 0 {
            return Err(ConfigError::ZeroMinBatch);
        }
        if self.sub_batch_width == 0 {
            return Err(ConfigError::ZeroSubBatchWidth);
        }
        if !(self.min_batch <= self.base_batch && self.base_batch <= self.max_batch) {
            return Err(ConfigError::BatchBounds {
                min: self.min_batch,
                base: self.base_batch,
                max: self.max_batch,
            });
        }
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            return Err(ConfigError::VelocityThreshold(self.velocity_threshold.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeliveryConfig::default();
        assert_eq!(config.initial_window_size, 30);
        assert_eq!(config.base_batch, 15);
        assert!(config.grow_step > config.shrink_step);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DeliveryConfig::default()
            .with_initial_window(10)
            .with_batch_bounds(8, 2, 16)
            .with_steps(4, 1)
            .with_cooldown(Duration::from_millis(50))
            .with_sub_batch_width(3);

        assert_eq!(config.initial_window_size, 10);
        assert_eq!((config.base_batch, config.min_batch, config.max_batch), (8, 2, 16));
        assert_eq!((config.grow_step, config.shrink_step), (4, 1));
        assert_eq!(config.cooldown, Duration::from_millis(50));
        assert_eq!(config.sub_batch_width, 3);
    }

    #[test]
    fn test_validation() {
        let zero_min = DeliveryConfig::default().with_batch_bounds(5, 0, 10);
        assert_eq!(zero_min.validate(), Err(ConfigError::ZeroMinBatch));

        let inverted = DeliveryConfig::default().with_batch_bounds(50, 5, 40);
        assert!(matches!(inverted.validate(), Err(ConfigError::BatchBounds { .. })));

        let zero_width = DeliveryConfig::default().with_sub_batch_width(0);
        assert_eq!(zero_width.validate(), Err(ConfigError::ZeroSubBatchWidth));

        let nan = DeliveryConfig::default().with_velocity_threshold(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::VelocityThreshold(_))));
    }

    #[test]
    fn test_serialization() {
        let config = DeliveryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: DeliveryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
