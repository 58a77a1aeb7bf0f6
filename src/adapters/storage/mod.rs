//! Storage Adapters
//!
//! Implementations of the KeyValueStore port and the pending queue
//! repository built on top of it.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One JSON file per key on disk, atomic writes
//! - **InMemoryKeyValueStore** - Stores documents in memory (testing/development)
//! - **StoredPendingQueue** - PendingQueueRepository over any KeyValueStore
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, StoredPendingQueue};
//!
//! let store = Arc::new(FileKeyValueStore::new("./data"));
//! let queue = StoredPendingQueue::new(store);
//! ```

mod file_store;
mod in_memory_store;
mod pending_queue;

pub use file_store::FileKeyValueStore;
pub use in_memory_store::InMemoryKeyValueStore;
pub use pending_queue::{StoredPendingQueue, CURRENT_CONTROL_KEY, PENDING_CONTROLS_KEY};
