//! Zone Catalog Loader - builds the live checklist for one zone.
//!
//! Loading is two passes: build a skeleton from the catalog, then overlay saved
//! values onto it. The catalog decides the shape (which elements and criteria
//! exist, and their weights); saved data decides the values (scores,
//! judgments, comments). Saved entries the catalog no longer knows about are
//! dropped.
//!
//! Edits are copy-on-write: every update returns a new element list.

use std::collections::HashMap;

use super::{CatalogZone, WeightedCatalog};
use crate::domain::foundation::{CriterionId, DomainError, ElementId, ZoneId};
use crate::domain::inspection::{Comment, Criterion, Element, Judgment};
use crate::domain::scoring::{criterion_weight, ScoreEngine};

/// Display name and merged elements of a loaded zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedZone {
    pub name: String,
    pub elements: Vec<Element>,
}

pub struct ZoneCatalogLoader;

impl ZoneCatalogLoader {
    /// Builds the zone from the catalog and overlays previously saved elements.
    ///
    /// # Errors
    ///
    /// - `ZoneNotFound` if the catalog has no such zone
    pub fn load_zone(
        catalog: &WeightedCatalog,
        saved: Option<&[Element]>,
        zone_id: &ZoneId,
    ) -> Result<LoadedZone, DomainError> {
        let zone = catalog
            .zone(zone_id)
            .ok_or_else(|| DomainError::ZoneNotFound(zone_id.clone()))?;

        let skeleton = Self::build_skeleton(zone);
        let elements = match saved {
            Some(saved) => Self::overlay(skeleton, saved),
            None => skeleton,
        };

        Ok(LoadedZone {
            name: zone.name.clone(),
            elements,
        })
    }

    /// First pass: materialize weighted elements and criteria.
    ///
    /// Elements or criteria with a zero coefficient are skipped, and so are
    /// elements left without any criterion.
    pub fn build_skeleton(zone: &CatalogZone) -> Vec<Element> {
        zone.elements
            .iter()
            .filter(|(_, el)| el.coef > 0)
            .filter_map(|(element_id, el)| {
                let element = el
                    .criteria
                    .iter()
                    .filter(|(_, c)| c.coef > 0)
                    .fold(Element::new(element_id.clone(), el.coef), |acc, (id, c)| {
                        acc.with_criterion(Criterion::new(
                            id.clone(),
                            criterion_weight(el.coef, c.coef),
                        ))
                    });
                (!element.criteria.is_empty()).then_some(element)
            })
            .collect()
    }

    /// Second pass: copy saved scores, judgments and comments onto matching
    /// skeleton entries. Weights stay as the catalog computed them.
    pub fn overlay(skeleton: Vec<Element>, saved: &[Element]) -> Vec<Element> {
        let saved_by_id: HashMap<&ElementId, &Element> = saved.iter().map(|e| (&e.id, e)).collect();

        skeleton
            .into_iter()
            .map(|mut element| {
                if let Some(previous) = saved_by_id.get(&element.id) {
                    element.score = previous.score;
                    for (id, criterion) in element.criteria.iter_mut() {
                        if let Some(old) = previous.criteria.get(id) {
                            criterion.judgment = old.judgment;
                            criterion.comment = old.comment.clone();
                        }
                    }
                }
                element
            })
            .collect()
    }

    /// Sets one criterion's judgment and rescores its element.
    ///
    /// A new failure clears the criterion's comment: the corrective note has
    /// to be entered again.
    ///
    /// # Errors
    ///
    /// - `InvalidElementIndex` when `element_index` is out of range
    /// - `InvalidCriterion` when the element has no such criterion
    ///
    /// Both report `ErrorCode::InvalidIndex`.
    pub fn update_judgment(
        elements: &[Element],
        element_index: usize,
        criterion_id: &CriterionId,
        judgment: Judgment,
        weather_bonus: bool,
    ) -> Result<Vec<Element>, DomainError> {
        let mut updated = elements.to_vec();
        let element = Self::element_mut(&mut updated, element_index)?;
        let criterion = Self::criterion_mut(element, element_index, criterion_id)?;

        criterion.judgment = judgment;
        if judgment == Judgment::Fail {
            criterion.comment = Comment::default();
        }

        element.score = ScoreEngine::element_score(element, weather_bonus);
        Ok(updated)
    }

    /// Sets one criterion's comment. Judgment and score are untouched.
    pub fn update_comment(
        elements: &[Element],
        element_index: usize,
        criterion_id: &CriterionId,
        text: impl Into<String>,
        photo_ref: Option<String>,
    ) -> Result<Vec<Element>, DomainError> {
        let mut updated = elements.to_vec();
        let element = Self::element_mut(&mut updated, element_index)?;
        let criterion = Self::criterion_mut(element, element_index, criterion_id)?;

        criterion.comment = Comment::new(text, photo_ref);
        Ok(updated)
    }

    fn element_mut(elements: &mut [Element], index: usize) -> Result<&mut Element, DomainError> {
        let len = elements.len();
        elements
            .get_mut(index)
            .ok_or(DomainError::InvalidElementIndex { index, len })
    }

    fn criterion_mut<'a>(
        element: &'a mut Element,
        index: usize,
        criterion_id: &CriterionId,
    ) -> Result<&'a mut Criterion, DomainError> {
        element
            .criteria
            .get_mut(criterion_id)
            .ok_or_else(|| DomainError::InvalidCriterion {
                index,
                criterion: criterion_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CatalogCriterion, CatalogElement};
    use crate::domain::foundation::{ErrorCode, Score};
    use std::collections::BTreeMap;

    fn zid(s: &str) -> ZoneId {
        ZoneId::new(s).unwrap()
    }
    fn eid(s: &str) -> ElementId {
        ElementId::new(s).unwrap()
    }
    fn cid(s: &str) -> CriterionId {
        CriterionId::new(s).unwrap()
    }

    fn catalog_element(coef: u32, criteria: &[(&str, u32)]) -> CatalogElement {
        CatalogElement {
            name: "element".to_string(),
            coef,
            criteria: criteria
                .iter()
                .map(|(id, coef)| {
                    (
                        cid(id),
                        CatalogCriterion {
                            name: id.to_string(),
                            coef: *coef,
                        },
                    )
                })
                .collect(),
        }
    }

    fn catalog() -> WeightedCatalog {
        let mut elements = BTreeMap::new();
        elements.insert(eid("sink"), catalog_element(3, &[("clean", 2), ("tap", 1), ("label", 0)]));
        elements.insert(eid("oven"), catalog_element(0, &[("door", 5)]));
        elements.insert(eid("walls"), catalog_element(2, &[("paint", 0)]));
        elements.insert(eid("floor"), catalog_element(1, &[("tiles", 4)]));

        let mut zones = BTreeMap::new();
        zones.insert(
            zid("kitchen"),
            CatalogZone {
                name: "Kitchen".to_string(),
                coef: 1,
                elements,
            },
        );
        WeightedCatalog::new(zones)
    }

    fn index_of(elements: &[Element], id: &str) -> usize {
        elements.iter().position(|e| e.id == eid(id)).unwrap()
    }

    #[test]
    fn unknown_zone_fails() {
        let err = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("attic")).unwrap_err();
        assert!(matches!(err, DomainError::ZoneNotFound(z) if z == zid("attic")));
    }

    #[test]
    fn skeleton_filters_weightless_entries() {
        let zone = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("kitchen")).unwrap();
        assert_eq!(zone.name, "Kitchen");

        let ids: Vec<_> = zone.elements.iter().map(|e| e.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["floor", "sink"]);

        let sink = &zone.elements[index_of(&zone.elements, "sink")];
        assert_eq!(sink.criteria.len(), 2);
        assert_eq!(sink.criteria[&cid("clean")].weight, 6);
        assert_eq!(sink.criteria[&cid("tap")].weight, 3);
        assert_eq!(sink.score, Score::NOT_EVALUATED);
    }

    #[test]
    fn overlay_copies_values_not_shape() {
        let fresh = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("kitchen")).unwrap();
        let sink_idx = index_of(&fresh.elements, "sink");

        let mut saved = ZoneCatalogLoader::update_judgment(
            &fresh.elements,
            sink_idx,
            &cid("tap"),
            Judgment::Pass,
            false,
        )
        .unwrap();
        // Stale data: an element and a criterion the catalog no longer has,
        // and a tampered weight.
        saved[sink_idx]
            .criteria
            .insert(cid("ghost"), Criterion::new(cid("ghost"), 9).with_judgment(Judgment::Fail));
        saved[sink_idx].criteria.get_mut(&cid("tap")).unwrap().weight = 999;
        saved.push(Element::new(eid("removed"), 4));

        let merged = ZoneCatalogLoader::load_zone(&catalog(), Some(&saved), &zid("kitchen")).unwrap();
        assert_eq!(merged.elements.len(), 2);

        let sink = &merged.elements[index_of(&merged.elements, "sink")];
        assert!(!sink.criteria.contains_key(&cid("ghost")));
        assert_eq!(sink.criteria[&cid("tap")].judgment, Judgment::Pass);
        assert_eq!(sink.criteria[&cid("tap")].weight, 3);
        assert_eq!(sink.score.value(), 100);
    }

    #[test]
    fn update_judgment_rescores_owning_element() {
        let zone = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("kitchen")).unwrap();
        let idx = index_of(&zone.elements, "sink");

        let step1 =
            ZoneCatalogLoader::update_judgment(&zone.elements, idx, &cid("clean"), Judgment::Pass, false)
                .unwrap();
        let step2 =
            ZoneCatalogLoader::update_judgment(&step1, idx, &cid("tap"), Judgment::Fail, false).unwrap();

        // 6 / 9
        assert_eq!(step2[idx].score.value(), 66);
        // Copy-on-write: input untouched
        assert_eq!(zone.elements[idx].score, Score::NOT_EVALUATED);
        assert_eq!(step1[idx].score.value(), 100);
    }

    #[test]
    fn failing_clears_comment() {
        let zone = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("kitchen")).unwrap();
        let idx = index_of(&zone.elements, "sink");

        let noted = ZoneCatalogLoader::update_comment(
            &zone.elements,
            idx,
            &cid("tap"),
            "leaks",
            Some("photo-1".to_string()),
        )
        .unwrap();
        assert_eq!(noted[idx].criteria[&cid("tap")].comment.text, "leaks");
        assert_eq!(noted[idx].score, Score::NOT_EVALUATED);

        let passed =
            ZoneCatalogLoader::update_judgment(&noted, idx, &cid("tap"), Judgment::Pass, false).unwrap();
        assert_eq!(passed[idx].criteria[&cid("tap")].comment.text, "leaks");

        let failed =
            ZoneCatalogLoader::update_judgment(&passed, idx, &cid("tap"), Judgment::Fail, false).unwrap();
        assert!(failed[idx].criteria[&cid("tap")].comment.is_empty());
    }

    #[test]
    fn bad_references_are_rejected() {
        let zone = ZoneCatalogLoader::load_zone(&catalog(), None, &zid("kitchen")).unwrap();

        let err =
            ZoneCatalogLoader::update_judgment(&zone.elements, 7, &cid("tap"), Judgment::Pass, false)
                .unwrap_err();
        assert!(matches!(err, DomainError::InvalidElementIndex { index: 7, len: 2 }));
        assert_eq!(err.code(), ErrorCode::InvalidIndex);

        let idx = index_of(&zone.elements, "floor");
        let err = ZoneCatalogLoader::update_comment(&zone.elements, idx, &cid("tap"), "x", None)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCriterion { .. }));
        assert_eq!(err.code(), ErrorCode::InvalidIndex);
    }
}
