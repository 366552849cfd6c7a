//! Card data: records, attribute enums, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card record
//! - `CardRecord`: Static card data plus a set-once resource slot
//! - `Category`, `EvolutionStage`, `ElementType`, `PackId`: enumerated attributes
//! - `StatKind`: Numeric stats addressable by filters
//! - `Catalog`: Ordered, read-only record set with id lookup
//!
//! ## Creature-only Attributes
//!
//! Stage, element and retreat cost only exist on creature cards. Records of
//! other categories (or with no category at all) never satisfy a predicate
//! over those fields.

pub mod attributes;
pub mod catalog;
pub mod record;

pub use attributes::{Category, ElementType, EvolutionStage, PackId, StatKind};
pub use catalog::{Catalog, CatalogProvider, UnavailableCatalog};
pub use record::{CardId, CardRecord, Move};
