//! Enumerated card attributes.
//!
//! Cards are classified along four axes that the filter engine can match
//! against a set of allowed values:
//!
//! - `Category`: creature or one of the trainer kinds
//! - `EvolutionStage`: only meaningful for creatures
//! - `ElementType`: only meaningful for creatures
//! - `PackId`: the booster pack a card was released in
//!
//! Numeric stats are addressed through `StatKind`.

use serde::{Deserialize, Serialize};

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// A creature card. The only category with a stage, element and retreat cost.
    Creature,
    /// Single-use item.
    Item,
    /// Supporter card (one per turn).
    Supporter,
    /// Tool attached to a creature.
    Tool,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Creature,
        Category::Item,
        Category::Supporter,
        Category::Tool,
    ];

    /// Whether stage, element and retreat cost are defined for this category.
    #[must_use]
    pub const fn is_creature(self) -> bool {
        matches!(self, Category::Creature)
    }
}

/// Evolution stage of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvolutionStage {
    Basic,
    Stage1,
    Stage2,
}

impl EvolutionStage {
    pub const ALL: [EvolutionStage; 3] = [
        EvolutionStage::Basic,
        EvolutionStage::Stage1,
        EvolutionStage::Stage2,
    ];
}

/// Element type of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    Dragon,
    Colorless,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Grass,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Lightning,
        ElementType::Psychic,
        ElementType::Fighting,
        ElementType::Darkness,
        ElementType::Metal,
        ElementType::Dragon,
        ElementType::Colorless,
    ];
}

/// Booster pack identifier.
///
/// Packs are released over time, so they are opaque ids rather than a
/// closed enum. The catalog loader assigns them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackId(pub u16);

impl PackId {
    /// Create a new pack ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pack({})", self.0)
    }
}

/// Numeric card stat addressed by a comparison predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// Hit points. Zero means "not applicable" (non-creatures).
    Hp,
    /// Highest base damage among the card's moves.
    MaxDamage,
    /// Highest energy cost among the card's moves.
    MaxEnergyCost,
    /// Energy needed to retreat. Creature-only.
    RetreatCost,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Hp,
        StatKind::MaxDamage,
        StatKind::MaxEnergyCost,
        StatKind::RetreatCost,
    ];

    /// Whether this stat is only defined for creature categories.
    #[must_use]
    pub const fn is_creature_only(self) -> bool {
        matches!(self, StatKind::RetreatCost)
    }
}
