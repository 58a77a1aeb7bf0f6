//! Pending queue repository port.
//!
//! The pending queue is the single shared mutable resource of the app. It is
//! injected as a repository instead of living in process-wide state, so
//! handlers and the sync coordinator can be tested against an in-memory store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InspectionId};
use crate::domain::inspection::Inspection;
use crate::domain::sync::PendingControls;

/// Repository for the pending-inspection queue and the currently open
/// inspection.
///
/// Implementations must ensure:
/// - `upsert` is keyed by inspection id (no duplicates)
/// - Whole-queue writes are atomic
#[async_trait]
pub trait PendingQueueRepository: Send + Sync {
    /// Load the whole queue. A queue never written is empty.
    async fn load_all(&self) -> Result<PendingControls, DomainError>;

    /// Find one inspection by id.
    async fn find(&self, id: &InspectionId) -> Result<Option<Inspection>, DomainError>;

    /// Insert or replace an inspection, keyed by its id.
    async fn upsert(&self, inspection: &Inspection) -> Result<(), DomainError>;

    /// Overwrite the whole queue.
    async fn replace_all(&self, queue: &PendingControls) -> Result<(), DomainError>;

    /// Read-modify-write the whole queue as one step. No `upsert` may
    /// interleave between the read and the write.
    async fn update_all<'a>(
        &'a self,
        apply: Box<dyn for<'q> FnOnce(&'q mut PendingControls) + Send + 'a>,
    ) -> Result<(), DomainError>;

    /// The inspection currently open for editing, if any.
    async fn load_current(&self) -> Result<Option<Inspection>, DomainError>;

    /// Remember `inspection` as the currently open one.
    async fn save_current(&self, inspection: &Inspection) -> Result<(), DomainError>;

    /// Forget the currently open inspection.
    async fn clear_current(&self) -> Result<(), DomainError>;

    /// Read-modify-write the currently open inspection as one step. `apply`
    /// returns whether it changed anything; only then is the record written.
    /// Returns `false` when nothing was written, including when no inspection
    /// is open.
    async fn update_current<'a>(
        &'a self,
        apply: Box<dyn for<'q> FnOnce(&'q mut Inspection) -> bool + Send + 'a>,
    ) -> Result<bool, DomainError>;

    /// Replace the open inspection with `inspection` when they share an id.
    async fn refresh_current(&self, inspection: &Inspection) -> Result<bool, DomainError> {
        let latest = inspection.clone();
        self.update_current(Box::new(move |current: &mut Inspection| {
            if current.id() != latest.id() {
                return false;
            }
            *current = latest;
            true
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_queue_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PendingQueueRepository) {}
    }
}
