//! Filter engine tests over a synthetic catalog.
//!
//! These tests verify:
//! - Soundness and completeness of `apply` against an independent oracle
//! - Idempotence of repeated applies
//! - Batch mode equivalence with exactly one recompute
//! - Creature-only and missing-category handling at catalog scale

use std::sync::Arc;

use card_catalog::cards::{
    CardId, CardRecord, Catalog, Category, ElementType, EvolutionStage, PackId, StatKind,
};
use card_catalog::filter::{normalize, Comparison, Criterion, FilterCriteria, FilterEngine};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const NAMES: &[&str] = &[
    "Sproutling", "Blazehound", "Tidefin", "Voltmouse", "Mindmoth", "Rockfist",
    "フシギダネ", "ピカチュウ", "ひとかげ", "Professor", "Potion", "Rare Candy",
];

const EFFECTS: &[&str] = &[
    "The defending creature is now Burned.",
    "Heal 30 damage from this creature.",
    "Draw 2 cards.",
    "Discard a Fire energy from this creature.",
    "Flip a coin. If heads, the defending creature is now Paralyzed.",
    "ふしぎなちからで 20 ダメージ。",
    "",
];

const QUERIES: &[&str] = &[
    "burn", "heal", "FIRE", "ｆｉｒｅ", "ふしぎ", "フシギ", "draw", "ピカ", "  ", "", "zzz",
];

fn random_record(rng: &mut ChaCha8Rng, id: u32) -> CardRecord {
    let category = match rng.gen_range(0..10) {
        0 => None,
        1..=6 => Some(Category::Creature),
        7 => Some(Category::Item),
        8 => Some(Category::Supporter),
        _ => Some(Category::Tool),
    };
    let name = NAMES.choose(rng).copied().unwrap_or("Card");
    let mut card = CardRecord::new(CardId::new(id), format!("{name} {id}"), category)
        .with_pack(PackId::new(rng.gen_range(0..4)));

    // Non-creatures sometimes carry stray stage/element data; it must be ignored.
    if category == Some(Category::Creature) || rng.gen_bool(0.3) {
        card.stage = EvolutionStage::ALL.choose(rng).copied();
        card.element = ElementType::ALL.choose(rng).copied();
    }
    if category == Some(Category::Creature) {
        card = card
            .with_stat(StatKind::Hp, rng.gen_range(3..=20) * 10)
            .with_stat(StatKind::MaxDamage, rng.gen_range(0..=12) * 10)
            .with_stat(StatKind::MaxEnergyCost, rng.gen_range(0..=4))
            .with_stat(StatKind::RetreatCost, rng.gen_range(0..=4));
    } else if rng.gen_bool(0.2) {
        card = card.with_stat(StatKind::Hp, rng.gen_range(1..=10) * 10);
    }
    for _ in 0..rng.gen_range(0..=2) {
        let effect = EFFECTS.choose(rng).copied().unwrap_or("");
        card = card.with_move("Move", effect);
    }
    card
}

fn synthetic_catalog(seed: u64, size: u32) -> Arc<Catalog> {
    synthetic_catalog_with(seed, size, Vec::new())
}

/// Synthetic records followed by `extra`, in that order.
fn synthetic_catalog_with(seed: u64, size: u32, extra: Vec<CardRecord>) -> Arc<Catalog> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records: Vec<_> = (0..size).map(|id| random_record(&mut rng, id)).collect();
    records.extend(extra);
    Arc::new(Catalog::from_records(records).expect("ids are unique"))
}

/// Independent predicate check, written against the raw record fields.
fn oracle(c: &FilterCriteria, r: &CardRecord) -> bool {
    let creature = r.category == Some(Category::Creature);

    if !c.categories.is_empty() && !matches!(r.category, Some(cat) if c.categories.contains(&cat)) {
        return false;
    }
    if !c.stages.is_empty() && !(creature && r.stage.map_or(false, |s| c.stages.contains(&s))) {
        return false;
    }
    if !c.elements.is_empty() && !(creature && r.element.map_or(false, |e| c.elements.contains(&e))) {
        return false;
    }
    if !c.packs.is_empty() && !c.packs.contains(&r.pack) {
        return false;
    }

    let stats = [
        (c.hp, r.hp, true, false),
        (c.max_damage, r.max_damage, false, false),
        (c.max_energy_cost, r.max_energy_cost, false, false),
        (c.retreat_cost, r.retreat_cost, false, true),
    ];
    for (pred, value, is_hp, creature_only) in stats {
        let ok = match pred.comparison {
            Comparison::None => continue,
            Comparison::LessOrEqual => value <= pred.value,
            Comparison::Equal => value == pred.value,
            Comparison::GreaterOrEqual => value >= pred.value,
        };
        if !ok || (is_hp && value == 0) || (creature_only && !creature) {
            return false;
        }
    }

    let query = c
        .text
        .as_deref()
        .map(|t| normalize(t).trim().to_string())
        .filter(|q| !q.is_empty());
    match query {
        None => true,
        Some(q) => normalize(&r.name).contains(&q) || r.moves.iter().any(|m| normalize(&m.effect).contains(&q)),
    }
}

fn arb_criterion() -> impl Strategy<Value = Criterion> {
    let packs: Vec<PackId> = (0..4).map(PackId::new).collect();
    let comparisons = vec![
        Comparison::None,
        Comparison::LessOrEqual,
        Comparison::Equal,
        Comparison::GreaterOrEqual,
    ];
    prop_oneof![
        proptest::option::of(prop::sample::select(QUERIES.to_vec()))
            .prop_map(|q| Criterion::Text(q.map(String::from))),
        prop::sample::subsequence(Category::ALL.to_vec(), 0..=4).prop_map(Criterion::Categories),
        prop::sample::subsequence(EvolutionStage::ALL.to_vec(), 0..=3).prop_map(Criterion::Stages),
        prop::sample::subsequence(ElementType::ALL.to_vec(), 0..=10).prop_map(Criterion::Elements),
        prop::sample::subsequence(packs, 0..=4).prop_map(Criterion::Packs),
        (
            prop::sample::select(StatKind::ALL.to_vec()),
            prop::sample::select(comparisons),
            -20i64..250,
        )
            .prop_map(|(stat, comparison, value)| Criterion::Stat { stat, comparison, value }),
    ]
}

fn ids(result: &[Arc<CardRecord>]) -> Vec<u32> {
    result.iter().map(|c| c.id.raw()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Result equals exactly the catalog records accepted by the oracle, in order.
    #[test]
    fn prop_apply_is_sound_and_complete(
        seed in 0u64..1_000,
        changes in prop::collection::vec(arb_criterion(), 0..6),
    ) {
        let catalog = synthetic_catalog(seed, 300);
        let mut engine = FilterEngine::new(catalog.clone());
        engine.begin_batch();
        for change in changes {
            engine.set_criterion(change);
        }
        let result = engine.end_batch();

        let expected: Vec<u32> = catalog
            .iter()
            .filter(|r| oracle(engine.criteria(), r))
            .map(|r| r.id.raw())
            .collect();
        prop_assert_eq!(ids(&result), expected);
    }

    /// Batched and unbatched criterion changes agree; batching costs one apply.
    #[test]
    fn prop_batch_equivalence(
        changes in prop::collection::vec(arb_criterion(), 1..8),
    ) {
        let catalog = synthetic_catalog(7, 300);

        let mut sequential = FilterEngine::new(catalog.clone());
        let mut last = Vec::new();
        for change in changes.clone() {
            last = sequential.set_criterion(change).expect("not batching");
        }
        prop_assert_eq!(sequential.stats().applies, changes.len() as u64);

        let mut batched = FilterEngine::new(catalog);
        batched.begin_batch();
        for change in changes {
            prop_assert!(batched.set_criterion(change).is_none());
        }
        let result = batched.end_batch();

        prop_assert_eq!(batched.stats().applies, 1);
        prop_assert_eq!(ids(&result), ids(&last));
    }

    /// Applying the same criteria twice yields the same ordered list.
    #[test]
    fn prop_apply_is_idempotent(
        changes in prop::collection::vec(arb_criterion(), 0..6),
    ) {
        let mut engine = FilterEngine::new(synthetic_catalog(11, 200));
        engine.begin_batch();
        for change in changes {
            engine.set_criterion(change);
        }
        let first = engine.end_batch();
        let second = engine.apply();
        prop_assert_eq!(ids(&first), ids(&second));
    }
}

/// Clearing all predicates returns the whole catalog in order.
#[test]
fn test_clear_all_after_narrowing() {
    let catalog = synthetic_catalog(3, 500);
    let mut engine = FilterEngine::new(catalog.clone());

    engine.begin_batch();
    engine.set_criterion(Criterion::Categories(vec![Category::Creature]));
    engine.set_criterion(Criterion::Elements(vec![ElementType::Fire]));
    let narrowed = engine.end_batch();
    assert!(narrowed.len() < catalog.len());

    let everything = engine.clear_all();
    let all_ids: Vec<u32> = catalog.iter().map(|c| c.id.raw()).collect();
    assert_eq!(ids(&everything), all_ids);
}

/// Creature-only predicates never admit non-creatures, even with stray data.
#[test]
fn test_creature_only_predicates_at_scale() {
    let mut engine = FilterEngine::new(synthetic_catalog(5, 1_000));

    engine.begin_batch();
    engine.set_criterion(Criterion::Stages(EvolutionStage::ALL.to_vec()));
    let staged = engine.end_batch();
    assert!(!staged.is_empty());
    assert!(staged.iter().all(|c| c.category == Some(Category::Creature)));

    engine.clear_all();
    let retreat = engine
        .set_criterion(Criterion::Stat {
            stat: StatKind::RetreatCost,
            comparison: Comparison::GreaterOrEqual,
            value: 0,
        })
        .unwrap();
    assert!(retreat.iter().all(|c| c.is_creature()));
}

/// Records without a category show up unfiltered and are counted.
#[test]
fn test_uncategorized_records_flagged() {
    let catalog = synthetic_catalog(9, 400);
    let uncategorized = catalog.iter().filter(|c| c.category.is_none()).count();
    assert!(uncategorized > 0);

    let mut engine = FilterEngine::new(catalog.clone());
    let all = engine.apply();
    assert_eq!(all.len(), catalog.len());
    assert_eq!(engine.stats().uncategorized, uncategorized);

    let categorized = engine
        .set_criterion(Criterion::Categories(Category::ALL.to_vec()))
        .unwrap();
    assert_eq!(categorized.len(), catalog.len() - uncategorized);
}

/// Width- and kana-folded queries match the same records.
#[test]
fn test_equivalent_queries_match_same_records() {
    let mut engine = FilterEngine::new(synthetic_catalog(13, 500));

    let ascii = engine.set_criterion(Criterion::Text(Some("fire".into()))).unwrap();
    let wide = engine.set_criterion(Criterion::Text(Some("ＦＩＲＥ".into()))).unwrap();
    assert_eq!(ids(&ascii), ids(&wide));

    let hira = engine.set_criterion(Criterion::Text(Some("ふしぎ".into()))).unwrap();
    let kata = engine.set_criterion(Criterion::Text(Some("フシギ".into()))).unwrap();
    assert!(!hira.is_empty());
    assert_eq!(ids(&hira), ids(&kata));
}

/// Folded queries find hand-written records among synthetic noise.
#[test]
fn test_folded_queries_find_known_records() {
    let known = vec![
        CardRecord::new(CardId::new(10_000), "Zephyr Wing", Some(Category::Item)),
        CardRecord::new(CardId::new(10_001), "ＺＥＰＨＹＲ　Ｇｕｓｔ", Some(Category::Supporter)),
        CardRecord::creature(CardId::new(10_002), "ゼファー", EvolutionStage::Basic, ElementType::Colorless)
            .with_move("Blow", "Blows away the wind."),
        CardRecord::new(CardId::new(10_003), "Kite", Some(Category::Tool))
            .with_move("Lift", "Catches a ぜふぁー breeze."),
    ];
    let mut engine = FilterEngine::new(synthetic_catalog_with(17, 400, known));

    let cases: &[(&str, &[u32])] = &[
        ("zephyr", &[10_000, 10_001]),
        ("ＺＥＰＨＹＲ", &[10_000, 10_001]),
        ("  ZEPHYR  ", &[10_000, 10_001]),
        ("zephyr gust", &[10_001]),
        ("ゼファー", &[10_002, 10_003]),
        ("ぜふぁー", &[10_002, 10_003]),
    ];
    for (query, expected) in cases {
        let result = engine
            .set_criterion(Criterion::Text(Some((*query).to_string())))
            .unwrap();
        assert_eq!(ids(&result), expected.to_vec(), "query {query:?}");
    }
}
