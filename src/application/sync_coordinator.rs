//! SyncCoordinator - submits the pending queue and reconciles the answer.
//!
//! One `sync()` call is one attempt:
//!
//! ```text
//! Idle -> Submitting -> { Success | PartialSuccess | Failure | NoNetwork } -> Idle
//! ```
//!
//! 1. Unreachable endpoint: `NoNetwork`, the queue is not read.
//! 2. Empty queue: `Success`.
//! 3. The whole queue goes out in one request with the caller's identity.
//! 4. Transport or parse failure: `Failure`, the queue is not written.
//! 5. Accepted items get their canonical fields written back (queue and
//!    current inspection).
//! 6. The purge policy runs whether or not the server reported item errors.
//!
//! Calls are serialized by an async mutex. Reconciliation re-reads the queue
//! and the open inspection under the repository's write lock, so edits made
//! while the batch was in flight are neither lost nor purged.
//!
//! No retry loop lives here; see `SyncScheduler`.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::Instrument;

use crate::domain::foundation::{DomainError, InspectionId};
use crate::domain::inspection::Inspection;
use crate::domain::sync::{
    AcceptedInspection, BatchPayload, BatchResponse, ItemError, PendingControls, PurgePolicy,
    SyncFailure, SyncResult,
};
use crate::ports::{BatchTransport, Clock, Connectivity, IdentityProvider, PendingQueueRepository};

pub struct SyncCoordinator {
    queue: Arc<dyn PendingQueueRepository>,
    transport: Arc<dyn BatchTransport>,
    connectivity: Arc<dyn Connectivity>,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    in_flight: Mutex<()>,
}

impl SyncCoordinator {
    pub fn new(
        queue: Arc<dyn PendingQueueRepository>,
        transport: Arc<dyn BatchTransport>,
        connectivity: Arc<dyn Connectivity>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            queue,
            transport,
            connectivity,
            identity,
            clock,
            in_flight: Mutex::new(()),
        }
    }

    /// Runs one sync attempt. Never fails: every problem is folded into the
    /// returned `SyncResult`.
    pub async fn sync(&self) -> SyncResult {
        let _guard = self.in_flight.lock().await;

        let span = tracing::info_span!("sync", pending = tracing::field::Empty);
        let result = self.attempt().instrument(span).await;
        tracing::info!(%result, "Sync finished");
        result
    }

    async fn attempt(&self) -> SyncResult {
        if !self.connectivity.is_reachable().await {
            tracing::info!("Endpoint unreachable, skipping sync");
            return SyncResult::NoNetwork;
        }

        let submitted = match self.queue.load_all().await {
            Ok(queue) => queue,
            Err(e) => return storage_failure(e),
        };
        tracing::Span::current().record("pending", submitted.len());

        if submitted.is_empty() {
            tracing::debug!("Pending queue is empty");
            return SyncResult::Success;
        }

        let identity = match self.identity.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => return SyncResult::Failure(SyncFailure::Unauthenticated),
            Err(e) => return storage_failure(e),
        };

        let payload = match BatchPayload::new(&identity.user_id, submitted.values(), self.clock.now()).to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => return storage_failure(e),
        };
        tracing::debug!(bytes = payload.len(), controls = submitted.len(), "Submitting batch");

        let raw = match self.transport.submit_batch(&payload, &identity).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Batch submission failed");
                return SyncResult::Failure(SyncFailure::Transport(e.to_string()));
            }
        };

        match BatchResponse::parse(&raw) {
            Ok(BatchResponse::Accepted { saved, errors }) => {
                match self.reconcile(submitted, saved, errors).await {
                    Ok(result) => result,
                    Err(e) => storage_failure(e),
                }
            }
            Ok(BatchResponse::Rejected { code, message }) => {
                tracing::warn!(%code, %message, "Server rejected batch");
                SyncResult::Failure(SyncFailure::Rejected { code, message })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable server response");
                SyncResult::Failure(SyncFailure::InvalidResponse(e.to_string()))
            }
        }
    }

    async fn reconcile(
        &self,
        submitted: PendingControls,
        saved: Vec<AcceptedInspection>,
        errors: Vec<ItemError>,
    ) -> Result<SyncResult, DomainError> {
        for error in &errors {
            tracing::warn!(inspection = %error.id, message = %error.message, "Server refused inspection");
        }

        let policy = PurgePolicy::new(self.clock.today());
        let mut purged: Vec<InspectionId> = Vec::new();
        let mut pinned: Vec<InspectionId> = Vec::new();

        self.queue
            .update_all(Box::new(|queue: &mut PendingControls| {
                // Anything that differs from what was sent changed locally
                // while the batch was in flight.
                let changed: HashSet<InspectionId> = queue
                    .iter()
                    .filter(|(id, current)| submitted.get(*id) != Some(*current))
                    .map(|(id, _)| id.clone())
                    .collect();

                for accepted in &saved {
                    match queue.get_mut(&accepted.id) {
                        Some(inspection) => accepted.apply_to(inspection),
                        None => tracing::debug!(inspection = %accepted.id, "Accepted id no longer queued"),
                    }
                }

                purged.extend(policy.apply(queue, &changed));
                pinned.extend(changed);
            }))
            .await?;

        let accepted_items = &saved;
        self.queue
            .update_current(Box::new(move |current: &mut Inspection| {
                match accepted_items.iter().find(|a| &a.id == current.id()) {
                    Some(accepted) => {
                        accepted.apply_to(current);
                        true
                    }
                    None => false,
                }
            }))
            .await?;

        tracing::info!(
            accepted = saved.len(),
            refused = errors.len(),
            purged = purged.len(),
            pinned = pinned.len(),
            "Batch reconciled"
        );

        if errors.is_empty() {
            Ok(SyncResult::Success)
        } else {
            Ok(SyncResult::PartialSuccess(errors))
        }
    }
}

fn storage_failure(error: DomainError) -> SyncResult {
    tracing::error!(error = %error, "Local storage failed during sync");
    SyncResult::Failure(SyncFailure::Storage(error.to_string()))
}
