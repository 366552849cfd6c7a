//! Filter engine statistics for diagnostics.

use serde::{Deserialize, Serialize};

/// Counters maintained by a `FilterEngine`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Full catalog scans performed.
    pub applies: u64,

    /// Records scanned by the most recent apply.
    pub last_scanned: usize,

    /// Records matched by the most recent apply.
    pub last_matched: usize,

    /// Records without a category seen by the most recent apply.
    pub uncategorized: usize,

    /// Applies that found no catalog at all.
    pub catalog_unavailable: u64,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of scanned records that matched in the last apply.
    #[must_use]
    pub fn selectivity(&self) -> f64 {
        if self.last_scanned == 0 {
            0.0
        } else {
            self.last_matched as f64 / self.last_scanned as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectivity() {
        let mut stats = FilterStats::new();
        assert_eq!(stats.selectivity(), 0.0);

        stats.last_scanned = 200;
        stats.last_matched = 50;
        assert_eq!(stats.selectivity(), 0.25);
    }
}
