//! Card records - static catalog data.
//!
//! `CardRecord` holds everything the filter engine can match against plus
//! the key used to load the card's image. Records are immutable once the
//! catalog is loaded, with one exception: the resource handle slot, which
//! is filled at most once by the delivery path after a prefetch.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{Category, ElementType, EvolutionStage, PackId, StatKind};
use crate::resources::ResourceHandle;

/// Unique identifier for a card record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card move: name plus free-text effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub effect: String,
}

impl Move {
    pub fn new(name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: effect.into(),
        }
    }
}

/// Static card record.
///
/// Stage, element and retreat cost are only meaningful for creature
/// categories. The accessors enforce that: `stage()` and `element()` return
/// `None` for anything that is not a creature, whatever the stored fields say.
///
/// ## Example
///
/// ```
/// use card_catalog::cards::{CardId, CardRecord, ElementType, EvolutionStage, PackId, StatKind};
///
/// let card = CardRecord::creature(CardId::new(1), "Sproutling", EvolutionStage::Basic, ElementType::Grass)
///     .with_pack(PackId::new(1))
///     .with_stat(StatKind::Hp, 60)
///     .with_move("Vine Whip", "Deal 20 damage.");
///
/// assert_eq!(card.stat(StatKind::Hp), 60);
/// assert_eq!(card.element(), Some(ElementType::Grass));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardRecord {
    /// Unique identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Category. `None` when the source data carried an empty or unknown tag.
    pub category: Option<Category>,

    /// Evolution stage (creatures only).
    pub stage: Option<EvolutionStage>,

    /// Element type (creatures only).
    pub element: Option<ElementType>,

    /// Booster pack.
    pub pack: PackId,

    pub hp: u32,
    pub max_damage: u32,
    pub max_energy_cost: u32,
    pub retreat_cost: u32,

    /// Moves, in card order. Most cards have one or two.
    pub moves: SmallVec<[Move; 2]>,

    /// Opaque key handed to the resource prefetcher.
    pub resource_key: String,

    #[serde(skip)]
    resource: OnceLock<ResourceHandle>,
}

impl CardRecord {
    /// Create a record with the given category and all stats at zero.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            stage: None,
            element: None,
            pack: PackId::new(0),
            hp: 0,
            max_damage: 0,
            max_energy_cost: 0,
            retreat_cost: 0,
            moves: SmallVec::new(),
            resource_key: format!("card/{}", id.raw()),
            resource: OnceLock::new(),
        }
    }

    /// Create a creature record.
    #[must_use]
    pub fn creature(
        id: CardId,
        name: impl Into<String>,
        stage: EvolutionStage,
        element: ElementType,
    ) -> Self {
        let mut card = Self::new(id, name, Some(Category::Creature));
        card.stage = Some(stage);
        card.element = Some(element);
        card
    }

    /// Set the pack (builder pattern).
    #[must_use]
    pub fn with_pack(mut self, pack: PackId) -> Self {
        self.pack = pack;
        self
    }

    /// Set a numeric stat (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, stat: StatKind, value: u32) -> Self {
        match stat {
            StatKind::Hp => self.hp = value,
            StatKind::MaxDamage => self.max_damage = value,
            StatKind::MaxEnergyCost => self.max_energy_cost = value,
            StatKind::RetreatCost => self.retreat_cost = value,
        }
        self
    }

    /// Add a move (builder pattern).
    #[must_use]
    pub fn with_move(mut self, name: impl Into<String>, effect: impl Into<String>) -> Self {
        self.moves.push(Move::new(name, effect));
        self
    }

    /// Override the resource key (builder pattern).
    #[must_use]
    pub fn with_resource_key(mut self, key: impl Into<String>) -> Self {
        self.resource_key = key.into();
        self
    }

    /// Whether creature-only attributes apply to this record.
    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.category.is_some_and(Category::is_creature)
    }

    /// Evolution stage, or `None` if this is not a creature.
    #[must_use]
    pub fn stage(&self) -> Option<EvolutionStage> {
        self.stage.filter(|_| self.is_creature())
    }

    /// Element type, or `None` if this is not a creature.
    #[must_use]
    pub fn element(&self) -> Option<ElementType> {
        self.element.filter(|_| self.is_creature())
    }

    /// Raw stat value.
    #[must_use]
    pub fn stat(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::MaxDamage => self.max_damage,
            StatKind::MaxEnergyCost => self.max_energy_cost,
            StatKind::RetreatCost => self.retreat_cost,
        }
    }

    /// Cached resource handle, if one has been attached.
    #[must_use]
    pub fn resource(&self) -> Option<&ResourceHandle> {
        self.resource.get()
    }

    /// Cache a resource handle on this record.
    ///
    /// Returns `false` if a handle was already attached; the first one wins.
    pub fn attach_resource(&self, handle: ResourceHandle) -> bool {
        self.resource.set(handle).is_ok()
    }
}
