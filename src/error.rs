//! Error types.
//!
//! Most degradations (empty catalog, bad criterion values, missing images,
//! superseded deliveries) are recovered where they happen and never reach
//! the caller. These types cover the few places that can refuse to work.

use thiserror::Error;

use crate::cards::CardId;

/// Failure to obtain the card catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate card id {0} in catalog")]
    DuplicateId(CardId),
}

/// Invalid delivery configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_batch must be at least 1")]
    ZeroMinBatch,

    #[error("sub_batch_width must be at least 1")]
    ZeroSubBatchWidth,

    #[error("batch bounds out of order: min {min} <= base {base} <= max {max} required")]
    BatchBounds { min: usize, base: usize, max: usize },

    #[error("velocity threshold must be finite and non-negative, got {0}")]
    VelocityThreshold(String),
}

/// Failure reported by a resource loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to load resource {key}: {reason}")]
    Load { key: String, reason: String },
}
