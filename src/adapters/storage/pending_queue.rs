//! Pending queue repository over a key-value store.
//!
//! The whole queue is one JSON document. Every mutation is a read-modify-write
//! of that document, serialized within the process by a mutex.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, InspectionId};
use crate::domain::inspection::Inspection;
use crate::domain::sync::PendingControls;
use crate::ports::{KeyValueStore, PendingQueueRepository, StorageError};

/// Key of the serialized pending queue.
pub const PENDING_CONTROLS_KEY: &str = "pending_controls";

/// Key of the currently open inspection.
pub const CURRENT_CONTROL_KEY: &str = "current_control";

pub struct StoredPendingQueue {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl StoredPendingQueue {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let Some(bytes) = self.store.load(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_slice(&bytes).map_err(|e| StorageError::DeserializationFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StorageError::SerializationFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.save(key, &bytes).await?;
        Ok(())
    }

    async fn read_queue(&self) -> Result<PendingControls, DomainError> {
        Ok(self.read(PENDING_CONTROLS_KEY).await?.unwrap_or_default())
    }
}

#[async_trait]
impl PendingQueueRepository for StoredPendingQueue {
    async fn load_all(&self) -> Result<PendingControls, DomainError> {
        self.read_queue().await
    }

    async fn find(&self, id: &InspectionId) -> Result<Option<Inspection>, DomainError> {
        Ok(self.read_queue().await?.remove(id))
    }

    async fn upsert(&self, inspection: &Inspection) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut queue = self.read_queue().await?;
        queue.insert(inspection.id().clone(), inspection.clone());
        self.write(PENDING_CONTROLS_KEY, &queue).await
    }

    async fn replace_all(&self, queue: &PendingControls) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        self.write(PENDING_CONTROLS_KEY, queue).await
    }

    async fn update_all<'a>(
        &'a self,
        apply: Box<dyn for<'q> FnOnce(&'q mut PendingControls) + Send + 'a>,
    ) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut queue = self.read_queue().await?;
        apply(&mut queue);
        self.write(PENDING_CONTROLS_KEY, &queue).await
    }

    async fn load_current(&self) -> Result<Option<Inspection>, DomainError> {
        self.read(CURRENT_CONTROL_KEY).await
    }

    async fn save_current(&self, inspection: &Inspection) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        self.write(CURRENT_CONTROL_KEY, inspection).await
    }

    async fn clear_current(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(CURRENT_CONTROL_KEY).await?;
        Ok(())
    }

    async fn update_current<'a>(
        &'a self,
        apply: Box<dyn for<'q> FnOnce(&'q mut Inspection) -> bool + Send + 'a>,
    ) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;
        let Some(mut current) = self.read::<Inspection>(CURRENT_CONTROL_KEY).await? else {
            return Ok(false);
        };
        if !apply(&mut current) {
            return Ok(false);
        }
        self.write(CURRENT_CONTROL_KEY, &current).await?;
        Ok(true)
    }
}
