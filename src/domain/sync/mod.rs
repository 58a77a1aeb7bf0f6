//! Sync module - wire shapes, outcomes and the purge policy used by the
//! synchronization coordinator.

mod outcome;
mod purge;
mod wire;

pub use outcome::{SyncFailure, SyncResult};
pub use purge::{PendingControls, PurgePolicy};
pub use wire::{AcceptedInspection, BatchPayload, BatchResponse, ItemError};
