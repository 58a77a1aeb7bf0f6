//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - File and in-memory key-value stores, the pending queue over them
//! - `http` - Batch transport and connectivity probe (reqwest)
//! - `environment` - Clocks, identity, connectivity switch
//! - `scheduler` - Background sync rounds

pub mod environment;
pub mod http;
pub mod scheduler;
pub mod storage;

pub use environment::{FixedClock, StaticIdentityProvider, SystemClock, ToggleConnectivity};
pub use http::{HttpBatchTransport, HttpConnectivityProbe, HttpTransportConfig};
pub use scheduler::{SyncScheduler, SyncSchedulerConfig, SyncTrigger};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, StoredPendingQueue};
