//! # card-catalog
//!
//! Filtering and incremental delivery for a large in-memory card catalog.
//!
//! ## Design Principles
//!
//! 1. **Filter once, deliver gradually**: a query is one linear scan; the
//!    result is handed to the view in pieces so images load as the user
//!    scrolls rather than all at once.
//!
//! 2. **Generations over cancellation**: a new query never waits for the
//!    old one to stop. Work for a superseded list checks its generation
//!    before touching the view and quietly gives up.
//!
//! 3. **Explicit wiring**: the catalog, prefetcher and view are passed in
//!    at construction. Nothing is looked up through globals.
//!
//! ## Modules
//!
//! - `cards`: Card records, attribute enums, catalog
//! - `filter`: Criteria, text normalization, filter engine
//! - `delivery`: Incremental delivery controller and its parts
//! - `resources`: Resource handles and prefetching
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use card_catalog::{
//!     CachedPrefetcher, Catalog, CardId, CardRecord, Category, Criterion, DeliveryConfig,
//!     DeliveryController, FilterEngine, PrefetchError, Resource, ResourceLoader, ViewNotifier,
//! };
//!
//! struct Art;
//!
//! #[async_trait::async_trait]
//! impl ResourceLoader for Art {
//!     async fn load(&self, key: &str) -> Result<Resource, PrefetchError> {
//!         Ok(Resource::new(key, Vec::new()))
//!     }
//! }
//!
//! struct Grid;
//!
//! impl ViewNotifier<Arc<CardRecord>> for Grid {
//!     fn on_reset(&self, items: &[Arc<CardRecord>]) {
//!         println!("showing {} cards", items.len());
//!     }
//!     fn on_append(&self, items: &[Arc<CardRecord>]) {
//!         println!("adding {} cards", items.len());
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let catalog = Arc::new(Catalog::from_records(
//!     (0..100).map(|i| CardRecord::new(CardId::new(i), format!("Card {i}"), Some(Category::Item))),
//! ).unwrap());
//!
//! let mut engine = FilterEngine::new(catalog);
//! let result = engine.set_criterion(Criterion::Text(Some("card 1".into()))).unwrap();
//!
//! let controller = DeliveryController::new(
//!     DeliveryConfig::default(),
//!     Arc::new(CachedPrefetcher::new(Art)),
//!     Arc::new(Grid),
//! ).unwrap();
//!
//! controller.reset(result).await;
//! assert_eq!(controller.cursor(), 11);
//! # });
//! ```

pub mod cards;
pub mod delivery;
pub mod error;
pub mod filter;
pub mod resources;

// Re-export commonly used types
pub use crate::cards::{
    CardId, CardRecord, Catalog, CatalogProvider, Category, ElementType, EvolutionStage, Move,
    PackId, StatKind, UnavailableCatalog,
};

pub use crate::filter::{Comparison, Criterion, FilterCriteria, FilterEngine, FilterStats, StatPredicate};

pub use crate::delivery::{
    ConsumptionSignal, Deliverable, DeliveryConfig, DeliveryController, DeliveryState,
    DeliveryStats, Generation, SignalOutcome, ViewNotifier,
};

pub use crate::resources::{CachedPrefetcher, Resource, ResourceHandle, ResourceLoader, ResourcePrefetcher};

pub use crate::error::{CatalogError, ConfigError, PrefetchError};
