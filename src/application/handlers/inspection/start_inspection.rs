//! StartInspectionHandler - Command handler for starting a control.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, InspectionId, ResidenceId};
use crate::domain::inspection::Inspection;
use crate::ports::{Clock, PendingQueueRepository};

/// Command to start an inspection of a residence.
#[derive(Debug, Clone)]
pub struct StartInspectionCommand {
    pub residence_id: ResidenceId,
    /// Defaults to the device's current day.
    pub date: Option<NaiveDate>,
}

/// Handler for starting inspections.
pub struct StartInspectionHandler {
    queue: Arc<dyn PendingQueueRepository>,
    clock: Arc<dyn Clock>,
}

impl StartInspectionHandler {
    pub fn new(queue: Arc<dyn PendingQueueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { queue, clock }
    }

    pub async fn handle(&self, cmd: StartInspectionCommand) -> Result<Inspection, DomainError> {
        // 1. Create the aggregate
        let date = cmd.date.unwrap_or_else(|| self.clock.today());
        let inspection = Inspection::new(InspectionId::generate(), cmd.residence_id, date);

        // 2. Queue it and open it for editing
        self.queue.upsert(&inspection).await?;
        self.queue.save_current(&inspection).await?;

        tracing::info!(
            inspection = %inspection.id(),
            residence = %inspection.residence_id(),
            %date,
            "Inspection started"
        );
        Ok(inspection)
    }
}
