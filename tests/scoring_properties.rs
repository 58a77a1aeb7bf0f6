//! Property tests for scoring, grid upserts and zone loading.

use proptest::prelude::*;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use inspection_sync::domain::catalog::{
    CatalogCriterion, CatalogElement, CatalogZone, WeightedCatalog, ZoneCatalogLoader,
};
use inspection_sync::domain::foundation::{
    CriterionId, ElementId, InspectionId, ResidenceId, Score, Timestamp, ZoneId,
};
use inspection_sync::domain::inspection::{Criterion, Element, Inspection, Judgment};
use inspection_sync::domain::scoring::ScoreEngine;

fn element_with(criteria: &[(u32, Judgment)]) -> Element {
    criteria
        .iter()
        .enumerate()
        .fold(Element::new(ElementId::new("el").unwrap(), 1), |el, (i, (weight, judgment))| {
            el.with_criterion(
                Criterion::new(CriterionId::new(format!("c{i}")).unwrap(), *weight).with_judgment(*judgment),
            )
        })
}

fn judgment() -> impl Strategy<Value = Judgment> {
    prop_oneof![Just(Judgment::Unset), Just(Judgment::Pass), Just(Judgment::Fail)]
}

/// One zone, `elements` elements of `criteria` criteria each, all coef 1..5.
fn catalog(elements: usize, criteria: usize, coef: u32) -> WeightedCatalog {
    let zone = CatalogZone {
        name: "Kitchen".to_string(),
        coef: 1,
        elements: (0..elements)
            .map(|e| {
                let element = CatalogElement {
                    name: format!("Element {e}"),
                    coef,
                    criteria: (0..criteria)
                        .map(|c| {
                            (
                                CriterionId::new(format!("c{c}")).unwrap(),
                                CatalogCriterion {
                                    name: format!("Criterion {c}"),
                                    coef: coef + c as u32,
                                },
                            )
                        })
                        .collect(),
                };
                (ElementId::new(format!("e{e}")).unwrap(), element)
            })
            .collect(),
    };

    let mut zones = BTreeMap::new();
    zones.insert(ZoneId::new("kitchen").unwrap(), zone);
    WeightedCatalog::new(zones)
}

fn inspection() -> Inspection {
    Inspection::new(
        InspectionId::new("ctrl-1").unwrap(),
        ResidenceId::new("res-1").unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_unjudged_element_is_not_evaluated(weights in prop::collection::vec(0u32..1000, 1..8), bonus in any::<bool>()) {
        let criteria: Vec<_> = weights.into_iter().map(|w| (w, Judgment::Unset)).collect();
        prop_assert_eq!(ScoreEngine::element_score(&element_with(&criteria), bonus), Score::NOT_EVALUATED);
    }

    #[test]
    fn prop_all_pass_without_bonus_is_full(
        weights in prop::collection::vec(1u32..1000, 1..8),
        unset in prop::collection::vec(0u32..1000, 0..4),
    ) {
        let criteria: Vec<_> = weights
            .into_iter()
            .map(|w| (w, Judgment::Pass))
            .chain(unset.into_iter().map(|w| (w, Judgment::Unset)))
            .collect();
        prop_assert_eq!(ScoreEngine::element_score(&element_with(&criteria), false).value(), 100);
    }

    #[test]
    fn prop_bonus_never_lowers_score(criteria in prop::collection::vec((0u32..1000, judgment()), 1..8)) {
        let element = element_with(&criteria);
        prop_assert!(ScoreEngine::element_score(&element, true) >= ScoreEngine::element_score(&element, false));
    }

    #[test]
    fn prop_global_score_lies_between_extremes(scores in prop::collection::vec(0i32..=110, 1..10)) {
        let scores: Vec<Score> = scores.into_iter().map(Score::new).collect();
        let global = ScoreEngine::global_score(&scores);
        prop_assert!(global >= *scores.iter().min().unwrap());
        prop_assert!(global <= *scores.iter().max().unwrap());
    }

    #[test]
    fn prop_upsert_same_zone_twice_keeps_one_snapshot(criteria in prop::collection::vec((0u32..100, judgment()), 1..6)) {
        let zone = ZoneId::new("kitchen").unwrap();
        let elements = vec![element_with(&criteria)];
        let mut inspection = inspection();

        inspection.upsert_zone(zone.clone(), elements.clone(), Timestamp::now());
        let once = inspection.clone();
        inspection.upsert_zone(zone.clone(), elements, Timestamp::now());

        prop_assert_eq!(inspection.grid().len(), 1);
        prop_assert_eq!(inspection.overall_score(), once.overall_score());
        prop_assert_eq!(&inspection.snapshot(&zone).unwrap().elements, &once.snapshot(&zone).unwrap().elements);
    }

    #[test]
    fn prop_saved_zone_reloads_with_same_judgments(
        shape in (1usize..4, 1usize..4, 1u32..5),
        edits in prop::collection::vec((0usize..4, 0usize..4, judgment(), any::<bool>()), 0..12),
    ) {
        let (element_count, criterion_count, coef) = shape;
        let catalog = catalog(element_count, criterion_count, coef);
        let zone = ZoneId::new("kitchen").unwrap();

        let mut elements = ZoneCatalogLoader::load_zone(&catalog, None, &zone).unwrap().elements;
        for (e, c, judgment, note) in edits {
            let e = e % element_count;
            let criterion = CriterionId::new(format!("c{}", c % criterion_count)).unwrap();
            elements = ZoneCatalogLoader::update_judgment(&elements, e, &criterion, judgment, false).unwrap();
            if note {
                elements = ZoneCatalogLoader::update_comment(&elements, e, &criterion, "note", None).unwrap();
            }
        }

        let mut inspection = inspection();
        inspection.upsert_zone(zone.clone(), elements.clone(), Timestamp::now());
        let saved = inspection.snapshot(&zone).map(|s| s.elements.as_slice());

        let reloaded = ZoneCatalogLoader::load_zone(&catalog, saved, &zone).unwrap();
        prop_assert_eq!(reloaded.elements, elements);
    }
}
