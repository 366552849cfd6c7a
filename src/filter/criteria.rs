//! Filter criteria.
//!
//! A `FilterCriteria` is a conjunction of optional predicates. Every
//! predicate has a neutral value (no text, empty set, `Comparison::None`)
//! that is always satisfied, so a default criteria matches everything.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Category, ElementType, EvolutionStage, PackId, StatKind};

/// How a numeric stat is compared against a predicate value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// Predicate disabled.
    #[default]
    None,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl Comparison {
    /// Compare `actual` against `expected`. `Comparison::None` always passes.
    #[must_use]
    pub fn holds(self, actual: u32, expected: u32) -> bool {
        match self {
            Comparison::None => true,
            Comparison::LessOrEqual => actual <= expected,
            Comparison::Equal => actual == expected,
            Comparison::GreaterOrEqual => actual >= expected,
        }
    }
}

/// A numeric comparison predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatPredicate {
    pub comparison: Comparison,
    pub value: u32,
}

impl StatPredicate {
    /// Build a predicate, clamping out-of-range values.
    ///
    /// Negative values become 0, values above `u32::MAX` become `u32::MAX`.
    /// The comparison is kept as given, so `(GreaterOrEqual, -5)` is an
    /// enabled predicate equivalent to `(GreaterOrEqual, 0)`.
    #[must_use]
    pub fn clamped(comparison: Comparison, value: i64) -> Self {
        Self {
            comparison,
            value: value.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.comparison != Comparison::None
    }
}

/// A single criterion change, as issued by a search form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Criterion {
    /// Free-text search over name and move effects. `None` or blank disables.
    Text(Option<String>),
    Categories(Vec<Category>),
    Stages(Vec<EvolutionStage>),
    Elements(Vec<ElementType>),
    Packs(Vec<PackId>),
    /// Numeric comparison. Values outside `0..=u32::MAX` are clamped.
    Stat {
        stat: StatKind,
        comparison: Comparison,
        value: i64,
    },
}

/// The full predicate set of a filter engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Raw text query as entered. Normalized when the engine applies it.
    pub text: Option<String>,

    /// Allowed categories. Empty means any.
    pub categories: FxHashSet<Category>,

    /// Allowed evolution stages. Empty means any. Creatures only.
    pub stages: FxHashSet<EvolutionStage>,

    /// Allowed element types. Empty means any. Creatures only.
    pub elements: FxHashSet<ElementType>,

    /// Allowed packs. Empty means any.
    pub packs: FxHashSet<PackId>,

    pub hp: StatPredicate,
    pub max_damage: StatPredicate,
    pub max_energy_cost: StatPredicate,
    pub retreat_cost: StatPredicate,
}

impl FilterCriteria {
    /// Criteria with every predicate disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one criterion change.
    pub fn set(&mut self, criterion: Criterion) {
        match criterion {
            Criterion::Text(text) => self.text = text,
            Criterion::Categories(values) => self.categories = values.into_iter().collect(),
            Criterion::Stages(values) => self.stages = values.into_iter().collect(),
            Criterion::Elements(values) => self.elements = values.into_iter().collect(),
            Criterion::Packs(values) => self.packs = values.into_iter().collect(),
            Criterion::Stat {
                stat,
                comparison,
                value,
            } => *self.stat_mut(stat) = StatPredicate::clamped(comparison, value),
        }
    }

    /// The predicate for a stat.
    #[must_use]
    pub fn stat(&self, stat: StatKind) -> &StatPredicate {
        match stat {
            StatKind::Hp => &self.hp,
            StatKind::MaxDamage => &self.max_damage,
            StatKind::MaxEnergyCost => &self.max_energy_cost,
            StatKind::RetreatCost => &self.retreat_cost,
        }
    }

    fn stat_mut(&mut self, stat: StatKind) -> &mut StatPredicate {
        match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::MaxDamage => &mut self.max_damage,
            StatKind::MaxEnergyCost => &mut self.max_energy_cost,
            StatKind::RetreatCost => &mut self.retreat_cost,
        }
    }

    /// Whether the text predicate is enabled (non-blank query).
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Number of enabled predicates.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        let sets = [
            !self.categories.is_empty(),
            !self.stages.is_empty(),
            !self.elements.is_empty(),
            !self.packs.is_empty(),
        ];
        let stats = StatKind::ALL.iter().filter(|s| self.stat(**s).is_enabled()).count();
        usize::from(self.has_text()) + sets.iter().filter(|on| **on).count() + stats
    }

    /// True when no predicate is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }

    /// Reset every predicate to its neutral value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
