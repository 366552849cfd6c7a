//! Catalog filtering.
//!
//! ## Key Types
//!
//! - `FilterCriteria`: Conjunction of optional predicates
//! - `Criterion`: A single predicate change
//! - `Comparison` / `StatPredicate`: Numeric stat comparison
//! - `FilterEngine`: Evaluates criteria against a catalog
//! - `FilterStats`: Scan counters
//!
//! Disabled predicates are vacuously true. Text queries are matched after
//! `normalize` folds width, kana script and case.

pub mod criteria;
pub mod engine;
pub mod normalize;
pub mod stats;

pub use criteria::{Comparison, Criterion, FilterCriteria, StatPredicate};
pub use engine::FilterEngine;
pub use normalize::{normalize, normalize_query};
pub use stats::FilterStats;
