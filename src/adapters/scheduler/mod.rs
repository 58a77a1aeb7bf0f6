//! Background scheduling of sync rounds.

mod sync_scheduler;

pub use sync_scheduler::{SyncScheduler, SyncSchedulerConfig, SyncTrigger};
