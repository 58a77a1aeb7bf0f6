//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `KeyValueStore` - Raw byte documents by key
//! - `PendingQueueRepository` - The pending-inspection queue and the open inspection
//!
//! ## Remote Ports
//!
//! - `BatchTransport` - Single-request batch submission
//! - `IdentityProvider` - Authenticated identity for the batch
//! - `Connectivity` - Reachability of the remote endpoint
//!
//! ## Environment Ports
//!
//! - `Clock` - Current time and local calendar day

mod environment;
mod key_value_store;
mod pending_queue;
mod transport;

pub use environment::{Clock, Connectivity};
pub use key_value_store::{KeyValueStore, StorageError};
pub use pending_queue::PendingQueueRepository;
pub use transport::{BatchTransport, Identity, IdentityProvider, TransportError};
