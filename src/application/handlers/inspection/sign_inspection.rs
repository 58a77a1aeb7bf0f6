//! SignInspectionHandler - Command handler for signing a control.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, InspectionId};
use crate::domain::inspection::Inspection;
use crate::ports::PendingQueueRepository;

/// Command to sign an inspection.
#[derive(Debug, Clone)]
pub struct SignInspectionCommand {
    pub inspection_id: InspectionId,
}

/// Handler for signing inspections.
///
/// A signed inspection leaves the pending queue at the end of the next
/// successful sync round.
pub struct SignInspectionHandler {
    queue: Arc<dyn PendingQueueRepository>,
}

impl SignInspectionHandler {
    pub fn new(queue: Arc<dyn PendingQueueRepository>) -> Self {
        Self { queue }
    }

    /// # Errors
    ///
    /// - `InspectionNotFound` if the queue has no such id
    /// - `InvalidInput` if no zone has been inspected yet
    pub async fn handle(&self, cmd: SignInspectionCommand) -> Result<Inspection, DomainError> {
        // 1. Load
        let mut inspection = self
            .queue
            .find(&cmd.inspection_id)
            .await?
            .ok_or_else(|| DomainError::InspectionNotFound(cmd.inspection_id.clone()))?;

        if inspection.is_signed() {
            return Ok(inspection);
        }

        // 2. Sign
        if inspection.grid().is_empty() {
            return Err(DomainError::invalid_input(format!(
                "inspection {} has no inspected zone",
                inspection.id()
            )));
        }
        inspection.sign();

        // 3. Persist, including the open copy
        self.queue.upsert(&inspection).await?;
        self.queue.refresh_current(&inspection).await?;

        tracing::info!(
            inspection = %inspection.id(),
            overall = %inspection.overall_score(),
            "Inspection signed"
        );
        Ok(inspection)
    }
}
