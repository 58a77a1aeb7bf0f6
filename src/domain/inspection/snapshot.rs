//! Zone snapshot - the persisted unit of grid state.

use serde::{Deserialize, Serialize};

use super::Element;
use crate::domain::foundation::{Score, Timestamp, ZoneId};
use crate::domain::scoring::ScoreEngine;

/// Scored elements of one zone as of its last edit.
///
/// Snapshots are replaced wholesale on every edit; they are never merged
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub zone_id: ZoneId,
    pub elements: Vec<Element>,
    pub timestamp: Timestamp,
}

impl ZoneSnapshot {
    pub fn new(zone_id: ZoneId, elements: Vec<Element>, timestamp: Timestamp) -> Self {
        Self {
            zone_id,
            elements,
            timestamp,
        }
    }

    /// Pooled score of the snapshot's elements.
    pub fn score(&self) -> Score {
        ScoreEngine::zone_score(&self.elements)
    }

    /// Whether any criterion in the zone has been judged.
    pub fn has_judgment(&self) -> bool {
        self.elements.iter().any(Element::has_judgment)
    }
}
