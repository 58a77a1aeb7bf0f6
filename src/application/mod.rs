//! Application layer - services and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `GridStore` and `ZoneEditor` serve the interactive editing path;
//! `SyncCoordinator` runs one synchronization attempt.

pub mod handlers;

mod grid_store;
mod sync_coordinator;
mod zone_editor;

pub use grid_store::GridStore;
pub use handlers::{
    SignInspectionCommand, SignInspectionHandler, StartInspectionCommand, StartInspectionHandler,
};
pub use sync_coordinator::SyncCoordinator;
pub use zone_editor::{AnnotateCriterionCommand, JudgeCriterionCommand, ZoneEdit, ZoneEditor};
