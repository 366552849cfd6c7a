//! Velocity-adaptive batch sizing.

use super::config::DeliveryConfig;

/// Tracks the current batch size with asymmetric hysteresis.
///
/// A fast signal (velocity strictly above the threshold) grows the batch by
/// `grow_step`; anything else shrinks it by `shrink_step`. The size is
/// clamped to `[min_batch, max_batch]` after every step.
#[derive(Clone, Debug)]
pub struct BatchSizer {
    size: usize,
    base: usize,
    min: usize,
    max: usize,
    grow_step: usize,
    shrink_step: usize,
    threshold: f64,
}

impl BatchSizer {
    pub fn new(config: &DeliveryConfig) -> Self {
        let mut sizer = Self {
            size: config.base_batch,
            base: config.base_batch,
            min: config.min_batch,
            max: config.max_batch,
            grow_step: config.grow_step,
            shrink_step: config.shrink_step,
            threshold: config.velocity_threshold,
        };
        sizer.size = sizer.clamp(sizer.base);
        sizer
    }

    /// Current batch size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Back to the base size.
    pub fn reset(&mut self) {
        self.size = self.clamp(self.base);
    }

    /// Adjust for one processed signal and return the new size.
    pub fn adapt(&mut self, velocity: f64) -> usize {
        let next = if velocity > self.threshold {
            self.size.saturating_add(self.grow_step)
        } else {
            self.size.saturating_sub(self.shrink_step)
        };
        self.size = self.clamp(next);
        self.size
    }

    fn clamp(&self, size: usize) -> usize {
        size.max(self.min).min(self.max.max(self.min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sizer() -> BatchSizer {
        BatchSizer::new(&DeliveryConfig::default())
    }

    #[test]
    fn test_fast_signal_grows() {
        let mut s = sizer();
        assert_eq!(s.size(), 15);
        assert_eq!(s.adapt(100.0), 20);
        assert_eq!(s.adapt(100.0), 25);
    }

    #[test]
    fn test_slow_signal_shrinks_to_min() {
        let mut s = sizer();
        let sizes: Vec<_> = (0..8).map(|_| s.adapt(0.0)).collect();
        assert_eq!(sizes, vec![13, 11, 9, 7, 5, 5, 5, 5]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut s = sizer();
        assert_eq!(s.adapt(40.0), 13);
    }

    #[test]
    fn test_grow_caps_at_max() {
        let mut s = sizer();
        for _ in 0..20 {
            s.adapt(1000.0);
        }
        assert_eq!(s.size(), 40);
        s.reset();
        assert_eq!(s.size(), 15);
    }

    proptest! {
        #[test]
        fn prop_size_stays_in_bounds(velocities in prop::collection::vec(0.0f64..500.0, 0..200)) {
            let mut s = sizer();
            for v in velocities {
                let size = s.adapt(v);
                prop_assert!((5..=40).contains(&size));
            }
        }
    }
}
