//! ZoneEditor - opens a zone for editing and saves each edit.
//!
//! Composes the catalog loader with `GridStore`: every judgment or comment is
//! applied to a fresh copy of the zone's elements, then the zone is saved back
//! into the inspection.

use std::sync::Arc;

use super::GridStore;
use crate::domain::catalog::{LoadedZone, WeightedCatalog, ZoneCatalogLoader};
use crate::domain::foundation::{CriterionId, DomainError, InspectionId, ZoneId};
use crate::domain::inspection::{Element, Inspection, Judgment};

/// Command to judge one criterion of a zone.
#[derive(Debug, Clone)]
pub struct JudgeCriterionCommand {
    pub inspection_id: InspectionId,
    pub zone_id: ZoneId,
    pub element_index: usize,
    pub criterion_id: CriterionId,
    pub judgment: Judgment,
    pub weather_bonus: bool,
}

/// Command to attach a comment (and optional photo) to one criterion.
#[derive(Debug, Clone)]
pub struct AnnotateCriterionCommand {
    pub inspection_id: InspectionId,
    pub zone_id: ZoneId,
    pub element_index: usize,
    pub criterion_id: CriterionId,
    pub text: String,
    pub photo_ref: Option<String>,
}

/// Result of a saved edit.
#[derive(Debug, Clone)]
pub struct ZoneEdit {
    pub inspection: Inspection,
    pub elements: Vec<Element>,
}

pub struct ZoneEditor {
    catalog: Arc<WeightedCatalog>,
    grid: Arc<GridStore>,
}

impl ZoneEditor {
    pub fn new(catalog: Arc<WeightedCatalog>, grid: Arc<GridStore>) -> Self {
        Self { catalog, grid }
    }

    /// Builds the zone's checklist, overlaid with whatever was saved for it.
    pub async fn open_zone(
        &self,
        inspection_id: &InspectionId,
        zone_id: &ZoneId,
    ) -> Result<LoadedZone, DomainError> {
        let inspection = self.grid.load(inspection_id).await?;
        self.load(&inspection, zone_id)
    }

    pub async fn judge(&self, cmd: JudgeCriterionCommand) -> Result<ZoneEdit, DomainError> {
        let inspection = self.grid.load(&cmd.inspection_id).await?;
        let zone = self.load(&inspection, &cmd.zone_id)?;

        let elements = ZoneCatalogLoader::update_judgment(
            &zone.elements,
            cmd.element_index,
            &cmd.criterion_id,
            cmd.judgment,
            cmd.weather_bonus,
        )?;

        self.save(inspection, cmd.zone_id, elements).await
    }

    /// Comments are stored with the zone, so the zone needs at least one
    /// judgment for the edit to be saved.
    pub async fn annotate(&self, cmd: AnnotateCriterionCommand) -> Result<ZoneEdit, DomainError> {
        let inspection = self.grid.load(&cmd.inspection_id).await?;
        let zone = self.load(&inspection, &cmd.zone_id)?;

        let elements = ZoneCatalogLoader::update_comment(
            &zone.elements,
            cmd.element_index,
            &cmd.criterion_id,
            cmd.text,
            cmd.photo_ref,
        )?;

        self.save(inspection, cmd.zone_id, elements).await
    }

    fn load(&self, inspection: &Inspection, zone_id: &ZoneId) -> Result<LoadedZone, DomainError> {
        let saved = inspection.snapshot(zone_id).map(|s| s.elements.as_slice());
        ZoneCatalogLoader::load_zone(&self.catalog, saved, zone_id)
    }

    async fn save(
        &self,
        inspection: Inspection,
        zone_id: ZoneId,
        elements: Vec<Element>,
    ) -> Result<ZoneEdit, DomainError> {
        let inspection = self.grid.save_zone(inspection, zone_id, elements.clone()).await?;
        Ok(ZoneEdit { inspection, elements })
    }
}
