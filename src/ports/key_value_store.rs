//! Key-Value Store Port - raw persistence used for the pending queue and the
//! currently open inspection.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize value for key '{key}': {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("Failed to deserialize value for key '{key}': {reason}")]
    DeserializationFailed { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Port for loading and saving opaque byte documents by key.
///
/// Each `save` must be atomic for its key: a reader sees either the previous
/// document or the new one, never a partial write.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the document stored under `key`.
    ///
    /// # Returns
    /// `None` if nothing has been saved under that key
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Save (or overwrite) the document stored under `key`.
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove the document stored under `key`. Removing a missing key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::unknown(err)
    }
}
