//! Property-based tests for RigForge
//!
//! These tests verify:
//! - Totals track exactly the filled slots
//! - PSU recommendation bounds
//! - Averaging and compatibility invariants
//! - Snapshot and share-token round-trips

use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;

use rigforge::aggregate::{self, PerformanceAxis};
use rigforge::catalog::{Attributes, Catalog, Component, Performance};
use rigforge::currency::{DigitGrouping, group_digits};
use rigforge::export;
use rigforge::selection::PcBuilder;
use rigforge::types::{Category, Severity};

fn builtin() -> Arc<Catalog> {
    Arc::new(Catalog::builtin())
}

/// One optional pick per slot, resolved against the bundled catalog
fn picks_strategy() -> impl Strategy<Value = Vec<Option<Index>>> {
    prop::collection::vec(prop::option::of(any::<Index>()), 8)
}

fn builder_from(picks: &[Option<Index>]) -> PcBuilder {
    let mut builder = PcBuilder::new(builtin());
    for (category, pick) in Category::all().zip(picks) {
        if let Some(index) = pick {
            let items = builder.catalog().list_by_category(category);
            let id = items[index.index(items.len())].id.clone();
            builder.select(category, &id).expect("catalog id");
        }
    }
    builder
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Cpu),
        Just(Category::Motherboard),
        Just(Category::Ram),
        Just(Category::Gpu),
        Just(Category::Storage),
        Just(Category::Psu),
        Just(Category::Case),
        Just(Category::Cooling),
    ]
}

// =============================================================================
// Totals
// =============================================================================

proptest! {
    /// Total price is the sum over exactly the filled slots
    #[test]
    fn total_price_is_sum_of_filled(picks in picks_strategy()) {
        let builder = builder_from(&picks);
        let expected: u64 = builder.build().iter().map(|(_, c)| u64::from(c.price)).sum();
        prop_assert_eq!(aggregate::total_price(builder.build()), expected);
        prop_assert_eq!(builder.build().filled_count(), picks.iter().flatten().count());
    }

    /// Filling an empty slot adds exactly its price; clearing it takes it back off
    #[test]
    fn add_then_remove_moves_total_by_price(
        picks in picks_strategy(),
        category in category_strategy(),
        index in any::<Index>(),
    ) {
        let mut builder = builder_from(&picks);
        builder.clear(category);
        let before = builder.summary().total_price;

        let items = builder.catalog().list_by_category(category);
        let id = items[index.index(items.len())].id.clone();
        let added = builder.select(category, &id).unwrap();

        let with = builder.summary().total_price;
        prop_assert_eq!(with, before + u64::from(added.price));

        builder.clear(category);
        prop_assert_eq!(builder.summary().total_price, before);
    }

    /// Replacing a slot never leaves two components in it
    #[test]
    fn reselect_keeps_one_per_slot(picks in picks_strategy(), a in any::<Index>(), b in any::<Index>()) {
        let mut builder = builder_from(&picks);
        let items = builder.catalog().list_by_category(Category::Gpu).to_vec();
        let first = &items[a.index(items.len())];
        let second = &items[b.index(items.len())];

        builder.select(Category::Gpu, &first.id).unwrap();
        let filled = builder.build().filled_count();
        builder.select(Category::Gpu, &second.id).unwrap();

        prop_assert_eq!(builder.build().filled_count(), filled);
        prop_assert_eq!(&builder.build().get(Category::Gpu).unwrap().id, &second.id);
    }
}

// =============================================================================
// PSU recommendation
// =============================================================================

proptest! {
    /// Always a multiple of 50, at least 1.3x the draw and under one step above it
    #[test]
    fn psu_recommendation_bounds(power in 0u32..200_000) {
        let recommended = aggregate::recommended_psu_wattage(power);
        prop_assert_eq!(recommended % 50, 0);

        let scaled = u64::from(power) * 13;
        let tenfold = u64::from(recommended) * 10;
        prop_assert!(tenfold >= scaled);
        prop_assert!(tenfold < scaled + 500);
    }

    /// More draw never lowers the recommendation
    #[test]
    fn psu_recommendation_is_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(aggregate::recommended_psu_wattage(lo) <= aggregate::recommended_psu_wattage(hi));
    }
}

// =============================================================================
// Performance and compatibility
// =============================================================================

proptest! {
    /// A single scored slot averages to its own triple
    #[test]
    fn single_slot_average_is_exact(
        category in category_strategy(),
        gaming in 0u8..=100,
        productivity in 0u8..=100,
        creation in 0u8..=100,
    ) {
        let part = Component::new(category, "only", "Only Part", "Acme", 10)
            .with_performance(Performance::new(gaming, productivity, creation));
        let mut builder = PcBuilder::new(Arc::new(Catalog::from_components(vec![part]).unwrap()));
        builder.select(category, "only").unwrap();

        let avg = aggregate::average_performance(builder.build());
        prop_assert_eq!(avg.score(PerformanceAxis::Gaming), f64::from(gaming));
        prop_assert_eq!(avg.score(PerformanceAxis::Productivity), f64::from(productivity));
        prop_assert_eq!(avg.score(PerformanceAxis::Creation), f64::from(creation));
    }

    /// Averages stay within 0-100 for any mix of catalog parts
    #[test]
    fn average_stays_in_range(picks in picks_strategy()) {
        let avg = builder_from(&picks).summary().performance;
        for axis in [PerformanceAxis::Gaming, PerformanceAxis::Productivity, PerformanceAxis::Creation] {
            prop_assert!((0.0..=100.0).contains(&avg.score(axis)));
        }
    }

    /// Differing sockets give exactly one error, equal sockets exactly one success
    #[test]
    fn socket_rule_yields_one_finding(a in "[A-Z]{2,4}[0-9]{1,4}", b in "[A-Z]{2,4}[0-9]{1,4}") {
        let socket = |s: &str| Attributes { socket: Some(s.to_string()), ..Default::default() };
        let catalog = Catalog::from_components(vec![
            Component::new(Category::Cpu, "cpu", "Cpu", "Acme", 100).with_attributes(socket(&a)),
            Component::new(Category::Motherboard, "board", "Board", "Acme", 100)
                .with_attributes(socket(&b)),
        ])
        .unwrap();
        let mut builder = PcBuilder::new(Arc::new(catalog));
        builder.select(Category::Cpu, "cpu").unwrap();
        builder.select(Category::Motherboard, "board").unwrap();

        let findings = aggregate::compatibility(builder.build());
        prop_assert_eq!(findings.len(), 1);
        let expected = if a == b { Severity::Success } else { Severity::Error };
        prop_assert_eq!(findings[0].severity, expected);
    }
}

// =============================================================================
// Round-trips
// =============================================================================

proptest! {
    /// Loading a build's own snapshot reproduces it
    #[test]
    fn snapshot_round_trip(picks in picks_strategy()) {
        let original = builder_from(&picks);
        let mut restored = PcBuilder::new(builtin());
        let report = restored.load_snapshot(&original.snapshot()).unwrap();

        prop_assert!(report.is_complete());
        prop_assert_eq!(restored.build(), original.build());
    }

    /// Share tokens carry the snapshot unchanged
    #[test]
    fn share_token_round_trip(picks in picks_strategy()) {
        let snapshot = builder_from(&picks).snapshot();
        let url = export::share_url("https://example.com/b", &snapshot).unwrap();
        prop_assert_eq!(export::decode_share_token(&url).unwrap(), snapshot);
    }

    /// Grouping only inserts separators
    #[test]
    fn grouping_preserves_digits(value in any::<u64>()) {
        for grouping in [DigitGrouping::Indian, DigitGrouping::Western] {
            let grouped = group_digits(value, grouping);
            prop_assert_eq!(grouped.replace(',', ""), value.to_string());
        }
    }
}
