//! Inspection module - checklist data shapes and the inspection aggregate.
//!
//! - `checklist` - Criterion, Element, Judgment, Comment
//! - `snapshot` - ZoneSnapshot, the per-zone unit stored in the grid
//! - `aggregate` - Inspection, the pending-queue record and its grid operations

mod aggregate;
mod checklist;
mod snapshot;

pub use aggregate::Inspection;
pub use checklist::{Comment, Criterion, Element, Judgment};
pub use snapshot::ZoneSnapshot;
