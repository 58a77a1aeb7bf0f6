//! Inspection aggregate - one control of one residence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Element, ZoneSnapshot};
use crate::domain::foundation::{InspectionId, ResidenceId, Score, Timestamp, ZoneId};
use crate::domain::scoring::ScoreEngine;

/// A pending-queue record.
///
/// # Invariants
///
/// - At most one snapshot per zone in `grid`; a zone absent from `grid` has
///   not been inspected.
/// - `overall_score` always equals the global score over `grid`; every grid
///   mutation recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    id: InspectionId,
    residence_id: ResidenceId,
    #[serde(default)]
    signed: bool,
    #[serde(default)]
    saved_on_server: bool,
    date: NaiveDate,
    #[serde(default)]
    overall_score: Score,
    #[serde(default)]
    grid: Vec<ZoneSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remote_id: Option<String>,
}

impl Inspection {
    /// Starts a fresh, unsigned inspection with an empty grid.
    pub fn new(id: InspectionId, residence_id: ResidenceId, date: NaiveDate) -> Self {
        Self {
            id,
            residence_id,
            signed: false,
            saved_on_server: false,
            date,
            overall_score: Score::NOT_EVALUATED,
            grid: Vec::new(),
            remote_id: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &InspectionId {
        &self.id
    }

    pub fn residence_id(&self) -> &ResidenceId {
        &self.residence_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn is_saved_on_server(&self) -> bool {
        self.saved_on_server
    }

    pub fn overall_score(&self) -> Score {
        self.overall_score
    }

    pub fn grid(&self) -> &[ZoneSnapshot] {
        &self.grid
    }

    pub fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }

    /// Snapshot for a zone, if it has been inspected.
    pub fn snapshot(&self, zone_id: &ZoneId) -> Option<&ZoneSnapshot> {
        self.grid.iter().find(|s| &s.zone_id == zone_id)
    }

    pub fn is_zone_inspected(&self, zone_id: &ZoneId) -> bool {
        self.snapshot(zone_id).is_some()
    }

    /// Elements of every inspected zone, keyed by zone.
    pub fn all_zone_scores(&self) -> BTreeMap<&ZoneId, &[Element]> {
        self.grid
            .iter()
            .map(|s| (&s.zone_id, s.elements.as_slice()))
            .collect()
    }

    /// Pooled score of every inspected zone, in grid order.
    pub fn zone_scores(&self) -> Vec<Score> {
        self.grid.iter().map(ZoneSnapshot::score).collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Grid mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the zone's snapshot, or appends one if the zone is new.
    pub fn upsert_zone(&mut self, zone_id: ZoneId, elements: Vec<Element>, at: Timestamp) {
        let snapshot = ZoneSnapshot::new(zone_id, elements, at);
        match self.grid.iter_mut().find(|s| s.zone_id == snapshot.zone_id) {
            Some(existing) => *existing = snapshot,
            None => self.grid.push(snapshot),
        }
        self.recompute_overall_score();
    }

    /// Drops the zone's snapshot so it reverts to "not inspected".
    ///
    /// Returns whether a snapshot was removed.
    pub fn remove_zone(&mut self, zone_id: &ZoneId) -> bool {
        let before = self.grid.len();
        self.grid.retain(|s| &s.zone_id != zone_id);
        let removed = self.grid.len() != before;
        if removed {
            self.recompute_overall_score();
        }
        removed
    }

    fn recompute_overall_score(&mut self) {
        self.overall_score = ScoreEngine::global_score(&self.zone_scores());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Marks the inspection as signed by the resident and inspector.
    pub fn sign(&mut self) {
        self.signed = true;
    }

    /// Whether the local editing lifecycle is still open on `today`:
    /// unsigned, dated today and not yet flagged saved on the server.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        !self.signed && self.date == today && !self.saved_on_server
    }

    /// Applies canonical fields confirmed by the server. Absent fields leave
    /// the local value untouched.
    pub fn apply_server_fields(
        &mut self,
        date: Option<NaiveDate>,
        saved_on_server: Option<bool>,
        remote_id: Option<String>,
    ) {
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(saved) = saved_on_server {
            self.saved_on_server = saved;
        }
        if remote_id.is_some() {
            self.remote_id = remote_id;
        }
    }
}
