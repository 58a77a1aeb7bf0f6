//! SyncScheduler - Background service that drives `SyncCoordinator`.
//!
//! The coordinator makes exactly one attempt per call; this service decides
//! when the next one happens:
//!
//! | Event | Effect |
//! |-------|--------|
//! | `poll_interval` elapsed | one sync round |
//! | `SyncTrigger::trigger()` | one sync round now (foreground action) |
//! | shutdown signal | loop exits; an in-flight round completes first |
//!
//! A `Failure` or `NoNetwork` outcome is simply retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::time::{self, MissedTickBehavior};

use crate::application::SyncCoordinator;
use crate::domain::sync::SyncResult;

/// Configuration for the SyncScheduler service.
#[derive(Debug, Clone)]
pub struct SyncSchedulerConfig {
    /// How often to attempt a sync round.
    pub poll_interval: Duration,
}

impl Default for SyncSchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
        }
    }
}

impl SyncSchedulerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Handle used by foreground code to request an immediate round.
#[derive(Debug, Clone)]
pub struct SyncTrigger {
    notify: Arc<Notify>,
}

impl SyncTrigger {
    /// Requests a round. Requests made while one is pending coalesce.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }
}

pub struct SyncScheduler {
    coordinator: Arc<SyncCoordinator>,
    config: SyncSchedulerConfig,
    notify: Arc<Notify>,
}

impl SyncScheduler {
    pub fn new(coordinator: Arc<SyncCoordinator>) -> Self {
        Self::with_config(coordinator, SyncSchedulerConfig::default())
    }

    pub fn with_config(coordinator: Arc<SyncCoordinator>, config: SyncSchedulerConfig) -> Self {
        Self {
            coordinator,
            config,
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn trigger_handle(&self) -> SyncTrigger {
        SyncTrigger {
            notify: self.notify.clone(),
        }
    }

    /// Requests an immediate round.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    /// Runs the scheduling loop until `shutdown` turns true or its sender is
    /// dropped. The first round happens immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(poll_interval = ?self.config.poll_interval, "Sync scheduler started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Sync scheduler stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.poll_once().await;
                }

                _ = self.notify.notified() => {
                    tracing::debug!("Sync requested");
                    self.poll_once().await;
                    interval.reset();
                }
            }
        }
    }

    /// Runs exactly one sync round and logs its outcome.
    pub async fn poll_once(&self) -> SyncResult {
        let result = self.coordinator.sync().await;
        match &result {
            SyncResult::Success => tracing::debug!("Sync round succeeded"),
            SyncResult::PartialSuccess(errors) => {
                tracing::warn!(refused = errors.len(), "Sync round partially succeeded")
            }
            SyncResult::Failure(reason) => {
                tracing::warn!(%reason, "Sync round failed, retrying next tick")
            }
            SyncResult::NoNetwork => tracing::debug!("Offline, retrying next tick"),
        }
        result
    }
}
