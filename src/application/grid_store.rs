//! GridStore - persisted per-zone snapshots of an inspection.
//!
//! The grid operations themselves live on the `Inspection` aggregate; this
//! service adds the persistence side effect: every call that changes the grid
//! writes the inspection back to the pending queue, and refreshes the
//! current-inspection record when it is the one open for editing.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, InspectionId, Score, ZoneId};
use crate::domain::inspection::{Element, Inspection};
use crate::ports::{Clock, PendingQueueRepository};

pub struct GridStore {
    queue: Arc<dyn PendingQueueRepository>,
    clock: Arc<dyn Clock>,
}

impl GridStore {
    pub fn new(queue: Arc<dyn PendingQueueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { queue, clock }
    }

    /// Loads an inspection from the pending queue.
    ///
    /// # Errors
    ///
    /// - `InspectionNotFound` if the queue has no such id
    pub async fn load(&self, id: &InspectionId) -> Result<Inspection, DomainError> {
        self.queue
            .find(id)
            .await?
            .ok_or_else(|| DomainError::InspectionNotFound(id.clone()))
    }

    /// Replaces (or appends) the snapshot for `zone_id`, recomputes the
    /// overall score and persists the inspection.
    pub async fn upsert_zone(
        &self,
        mut inspection: Inspection,
        zone_id: ZoneId,
        elements: Vec<Element>,
    ) -> Result<Inspection, DomainError> {
        inspection.upsert_zone(zone_id, elements, self.clock.now());
        self.persist(&inspection).await?;
        Ok(inspection)
    }

    /// Drops the snapshot for `zone_id` so the zone reads as not inspected.
    /// Nothing is written when the zone had no snapshot.
    pub async fn remove_zone(
        &self,
        mut inspection: Inspection,
        zone_id: &ZoneId,
    ) -> Result<Inspection, DomainError> {
        if inspection.remove_zone(zone_id) {
            self.persist(&inspection).await?;
        }
        Ok(inspection)
    }

    pub fn all_zone_scores(inspection: &Inspection) -> BTreeMap<&ZoneId, &[Element]> {
        inspection.all_zone_scores()
    }

    /// Score of one zone, or `-1` when the zone was never inspected.
    pub fn zone_score(inspection: &Inspection, zone_id: &ZoneId) -> Score {
        inspection
            .snapshot(zone_id)
            .map(|snapshot| snapshot.score())
            .unwrap_or(Score::NOT_EVALUATED)
    }

    /// Saves the result of editing a zone.
    ///
    /// Elements carrying at least one judgment replace the zone's snapshot.
    /// Elements with no judgment at all revert the zone to not inspected.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when nothing is judged and the zone has no snapshot
    pub async fn save_zone(
        &self,
        inspection: Inspection,
        zone_id: ZoneId,
        elements: Vec<Element>,
    ) -> Result<Inspection, DomainError> {
        if elements.iter().any(Element::has_judgment) {
            return self.upsert_zone(inspection, zone_id, elements).await;
        }

        if inspection.is_zone_inspected(&zone_id) {
            tracing::debug!(zone = %zone_id, "Zone has no judgment left, reverting");
            return self.remove_zone(inspection, &zone_id).await;
        }

        Err(DomainError::invalid_input(format!(
            "zone {} has no judgment to save",
            zone_id
        )))
    }

    async fn persist(&self, inspection: &Inspection) -> Result<(), DomainError> {
        self.queue.upsert(inspection).await?;
        self.queue.refresh_current(inspection).await?;

        tracing::debug!(
            inspection = %inspection.id(),
            zones = inspection.grid().len(),
            overall = %inspection.overall_score(),
            "Inspection grid persisted"
        );
        Ok(())
    }
}
