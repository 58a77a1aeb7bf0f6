//! Live checklist tree: elements holding weighted criteria.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{CriterionId, ElementId, Score};

/// The inspector's verdict on one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    #[default]
    Unset,
    Pass,
    Fail,
}

impl Judgment {
    /// Whether the criterion has been judged either way.
    pub fn is_set(&self) -> bool {
        !matches!(self, Judgment::Unset)
    }
}

/// Corrective note attached to a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl Comment {
    pub fn new(text: impl Into<String>, photo_ref: Option<String>) -> Self {
        Self {
            text: text.into(),
            photo_ref,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.photo_ref.is_none()
    }
}

/// One judgeable line of the checklist.
///
/// `weight` is `element coef * criterion coef`, fixed when the criterion is
/// built from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    #[serde(default)]
    pub judgment: Judgment,
    pub weight: u32,
    #[serde(default)]
    pub comment: Comment,
}

impl Criterion {
    /// Creates an unjudged criterion with the given frozen weight.
    pub fn new(id: CriterionId, weight: u32) -> Self {
        Self {
            id,
            judgment: Judgment::Unset,
            weight,
            comment: Comment::default(),
        }
    }

    pub fn with_judgment(mut self, judgment: Judgment) -> Self {
        self.judgment = judgment;
        self
    }
}

/// A scored group of criteria inside a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub weight: u32,
    #[serde(default)]
    pub score: Score,
    pub criteria: BTreeMap<CriterionId, Criterion>,
}

impl Element {
    /// Creates an element with no criteria and no score.
    pub fn new(id: ElementId, weight: u32) -> Self {
        Self {
            id,
            weight,
            score: Score::NOT_EVALUATED,
            criteria: BTreeMap::new(),
        }
    }

    /// Adds a criterion, replacing any criterion with the same id.
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.insert(criterion.id.clone(), criterion);
        self
    }

    /// Whether any criterion in this element has been judged.
    pub fn has_judgment(&self) -> bool {
        self.criteria.values().any(|c| c.judgment.is_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> CriterionId {
        CriterionId::new(s).unwrap()
    }

    #[test]
    fn judgment_defaults_to_unset() {
        assert_eq!(Judgment::default(), Judgment::Unset);
        assert!(!Judgment::Unset.is_set());
        assert!(Judgment::Fail.is_set());
    }

    #[test]
    fn judgment_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Judgment::Pass).unwrap(), "\"pass\"");
        let j: Judgment = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(j, Judgment::Fail);
    }

    #[test]
    fn element_has_judgment_tracks_criteria() {
        let element = Element::new(ElementId::new("sink").unwrap(), 2)
            .with_criterion(Criterion::new(cid("clean"), 4));
        assert!(!element.has_judgment());

        let element = element.with_criterion(Criterion::new(cid("tap"), 2).with_judgment(Judgment::Fail));
        assert!(element.has_judgment());
    }

    #[test]
    fn comment_emptiness() {
        assert!(Comment::default().is_empty());
        assert!(!Comment::new("", Some("photo-1".into())).is_empty());
        assert!(!Comment::new("stain", None).is_empty());
    }

    #[test]
    fn criterion_deserializes_with_defaults() {
        let c: Criterion = serde_json::from_str(r#"{"id":"tap","weight":6}"#).unwrap();
        assert_eq!(c.judgment, Judgment::Unset);
        assert!(c.comment.is_empty());
    }
}
