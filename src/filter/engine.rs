//! The filter engine.
//!
//! `FilterEngine` owns a `FilterCriteria` and evaluates it against a shared
//! catalog. Each apply is one linear scan; results keep catalog order.
//!
//! ## Batch Mode
//!
//! A search form usually changes several predicates at once. Wrapping the
//! changes in `begin_batch` / `end_batch` defers the scan so the whole
//! change costs exactly one apply.
//!
//! ```
//! use std::sync::Arc;
//! use card_catalog::cards::{Catalog, CardId, CardRecord, Category, StatKind};
//! use card_catalog::filter::{Comparison, Criterion, FilterEngine};
//!
//! let catalog = Arc::new(Catalog::from_records(vec![
//!     CardRecord::new(CardId::new(1), "Potion", Some(Category::Item)),
//!     CardRecord::new(CardId::new(2), "Professor", Some(Category::Supporter)),
//! ]).unwrap());
//!
//! let mut engine = FilterEngine::new(catalog);
//! engine.begin_batch();
//! assert!(engine.set_criterion(Criterion::Categories(vec![Category::Item])).is_none());
//! assert!(engine.set_criterion(Criterion::Text(Some("pot".into()))).is_none());
//! let result = engine.end_batch();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(engine.stats().applies, 1);
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use super::criteria::{Criterion, FilterCriteria};
use super::normalize::{normalize, normalize_query};
use super::stats::FilterStats;
use crate::cards::{CardRecord, CatalogProvider, StatKind};

/// Multi-predicate filter over a catalog.
pub struct FilterEngine {
    catalog: Arc<dyn CatalogProvider>,
    criteria: FilterCriteria,
    batching: bool,
    result: Vec<Arc<CardRecord>>,
    stats: FilterStats,
}

impl FilterEngine {
    /// Create an engine with every predicate disabled.
    ///
    /// No scan is performed until the first apply.
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            criteria: FilterCriteria::default(),
            batching: false,
            result: Vec::new(),
            stats: FilterStats::new(),
        }
    }

    /// Current criteria.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Result of the most recent apply.
    #[must_use]
    pub fn last_result(&self) -> &[Arc<CardRecord>] {
        &self.result
    }

    #[must_use]
    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    /// Whether recomputes are currently deferred.
    #[must_use]
    pub fn is_batching(&self) -> bool {
        self.batching
    }

    /// Update one predicate.
    ///
    /// Recomputes and returns the new result, or returns `None` while a
    /// batch is open.
    pub fn set_criterion(&mut self, criterion: Criterion) -> Option<Vec<Arc<CardRecord>>> {
        self.criteria.set(criterion);
        if self.batching {
            None
        } else {
            Some(self.apply())
        }
    }

    /// Defer recomputes until `end_batch`.
    pub fn begin_batch(&mut self) {
        self.batching = true;
    }

    /// Close the batch and apply exactly once.
    ///
    /// Calling this without an open batch still applies once.
    pub fn end_batch(&mut self) -> Vec<Arc<CardRecord>> {
        self.batching = false;
        self.apply()
    }

    /// Reset every predicate and apply.
    ///
    /// Returns the full catalog in catalog order. This is an explicit apply
    /// and runs even while a batch is open.
    pub fn clear_all(&mut self) -> Vec<Arc<CardRecord>> {
        self.criteria.clear();
        self.apply()
    }

    /// Scan the catalog once and return every record matching all enabled
    /// predicates, in catalog order.
    ///
    /// A missing or empty catalog yields an empty result.
    pub fn apply(&mut self) -> Vec<Arc<CardRecord>> {
        self.stats.applies += 1;

        let records = match self.catalog.get_all() {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "no catalog, filter result is empty");
                self.stats.catalog_unavailable += 1;
                self.stats.last_scanned = 0;
                self.stats.last_matched = 0;
                self.stats.uncategorized = 0;
                self.result.clear();
                return Vec::new();
            }
        };

        if records.is_empty() {
            debug!("catalog is empty");
        }

        let matcher = Matcher::new(&self.criteria);
        let mut uncategorized = 0;
        let mut matched = Vec::new();

        for record in records.iter() {
            if record.category.is_none() {
                uncategorized += 1;
            }
            if matcher.matches(record) {
                matched.push(Arc::clone(record));
            }
        }

        if uncategorized > 0 {
            warn!(count = uncategorized, "records without a category");
        }

        self.stats.last_scanned = records.len();
        self.stats.last_matched = matched.len();
        self.stats.uncategorized = uncategorized;
        debug!(
            scanned = records.len(),
            matched = matched.len(),
            predicates = self.criteria.enabled_count(),
            "filter applied"
        );

        self.result.clone_from(&matched);
        matched
    }
}

/// Criteria prepared for a scan: the query is normalized once up front.
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    query: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            query: criteria.text.as_deref().and_then(normalize_query),
        }
    }

    fn matches(&self, record: &CardRecord) -> bool {
        self.matches_sets(record)
            && StatKind::ALL.iter().all(|&stat| self.matches_stat(record, stat))
            && self.matches_text(record)
    }

    fn matches_sets(&self, record: &CardRecord) -> bool {
        let c = self.criteria;

        if !c.categories.is_empty() && !record.category.is_some_and(|cat| c.categories.contains(&cat)) {
            return false;
        }
        if !c.stages.is_empty() && !record.stage().is_some_and(|s| c.stages.contains(&s)) {
            return false;
        }
        if !c.elements.is_empty() && !record.element().is_some_and(|e| c.elements.contains(&e)) {
            return false;
        }
        c.packs.is_empty() || c.packs.contains(&record.pack)
    }

    fn matches_stat(&self, record: &CardRecord, stat: StatKind) -> bool {
        let pred = self.criteria.stat(stat);
        if !pred.is_enabled() {
            return true;
        }
        if stat.is_creature_only() && !record.is_creature() {
            return false;
        }
        let actual = record.stat(stat);
        // hp 0 means the card has no hp at all
        if stat == StatKind::Hp && actual == 0 {
            return false;
        }
        pred.comparison.holds(actual, pred.value)
    }

    fn matches_text(&self, record: &CardRecord) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        normalize(&record.name).contains(query)
            || record.moves.iter().any(|m| normalize(&m.effect).contains(query))
    }
}
