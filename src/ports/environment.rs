//! Environment ports - connectivity and wall clock.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Port for checking whether the remote endpoint can be reached.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Port for the current time. "Today" is the inspector's local calendar day.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    fn today(&self) -> NaiveDate;
}
