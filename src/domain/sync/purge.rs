//! Purge policy - which inspections leave the pending queue after a sync.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::InspectionId;
use crate::domain::inspection::Inspection;

/// The pending queue as persisted: one record per inspection id.
pub type PendingControls = BTreeMap<InspectionId, Inspection>;

/// Keeps only inspections whose local editing lifecycle is still open:
/// unsigned, dated today, not flagged saved on the server. Everything else is
/// closed out.
#[derive(Debug, Clone, Copy)]
pub struct PurgePolicy {
    today: NaiveDate,
}

impl PurgePolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn retains(&self, inspection: &Inspection) -> bool {
        inspection.is_open_on(self.today)
    }

    /// Removes closed inspections from `queue` and returns their ids.
    ///
    /// Ids in `pinned` are kept regardless; they changed locally after the
    /// batch was built and the server has not seen their current state.
    pub fn apply(&self, queue: &mut PendingControls, pinned: &HashSet<InspectionId>) -> Vec<InspectionId> {
        let mut purged = Vec::new();
        queue.retain(|id, inspection| {
            let keep = pinned.contains(id) || self.retains(inspection);
            if !keep {
                purged.push(id.clone());
            }
            keep
        });
        purged
    }
}
