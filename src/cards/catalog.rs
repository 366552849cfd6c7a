//! Card catalog.
//!
//! The `Catalog` stores every card record in load order and provides
//! lookup by `CardId`. It is read-only after construction and cheap to
//! share: wrap it in an `Arc` and hand it to as many filter engines as
//! needed.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::record::{CardId, CardRecord};
use crate::error::CatalogError;

/// Source of card records.
///
/// `get_all` must be restartable: repeated calls without an intervening
/// mutation return the same records in the same order.
pub trait CatalogProvider: Send + Sync {
    /// All records in catalog order.
    fn get_all(&self) -> Result<Arc<[Arc<CardRecord>]>, CatalogError>;

    /// Look up a single record.
    fn get_by_id(&self, id: CardId) -> Option<Arc<CardRecord>>;
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use card_catalog::cards::{Catalog, CatalogProvider, CardId, CardRecord, Category};
///
/// let catalog = Catalog::from_records(vec![
///     CardRecord::new(CardId::new(1), "Potion", Some(Category::Item)),
///     CardRecord::new(CardId::new(2), "Professor", Some(Category::Supporter)),
/// ]).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get_by_id(CardId::new(2)).unwrap().name, "Professor");
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Arc<[Arc<CardRecord>]>,
    index: FxHashMap<CardId, usize>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// Fails if two records share an id.
    pub fn from_records(
        records: impl IntoIterator<Item = CardRecord>,
    ) -> Result<Self, CatalogError> {
        let records: Vec<Arc<CardRecord>> = records.into_iter().map(Arc::new).collect();
        let mut index = FxHashMap::default();
        index.reserve(records.len());

        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        Ok(Self {
            records: records.into(),
            index,
        })
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            index: FxHashMap::default(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardRecord>> {
        self.records.iter()
    }
}

impl CatalogProvider for Catalog {
    fn get_all(&self) -> Result<Arc<[Arc<CardRecord>]>, CatalogError> {
        Ok(Arc::clone(&self.records))
    }

    fn get_by_id(&self, id: CardId) -> Option<Arc<CardRecord>> {
        self.index.get(&id).map(|&pos| Arc::clone(&self.records[pos]))
    }
}

/// A catalog that could not be obtained.
///
/// Filter engines built over it degrade to empty results.
#[derive(Clone, Debug)]
pub struct UnavailableCatalog {
    reason: String,
}

impl UnavailableCatalog {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CatalogProvider for UnavailableCatalog {
    fn get_all(&self) -> Result<Arc<[Arc<CardRecord>]>, CatalogError> {
        Err(CatalogError::Unavailable(self.reason.clone()))
    }

    fn get_by_id(&self, _id: CardId) -> Option<Arc<CardRecord>> {
        None
    }
}
