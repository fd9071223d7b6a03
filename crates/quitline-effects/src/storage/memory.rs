//! In-memory storage handler for testing

use async_trait::async_trait;
use quitline_core::effects::StorageEffects;
use quitline_core::StorageError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage handler for testing.
#[derive(Clone, Default)]
pub struct MemoryStorageHandler {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorageHandler {
    /// Create a new memory storage handler.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageEffects for MemoryStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.insert(key.to_string(), value);
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut data = self.data.write().await;
        Ok(data.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_retrieve_remove() {
        let storage = MemoryStorageHandler::new();
        storage
            .store("prefs", b"hello".to_vec())
            .await
            .expect("store succeeds");
        assert_eq!(
            storage.retrieve("prefs").await.expect("retrieve succeeds"),
            Some(b"hello".to_vec())
        );
        assert!(storage.remove("prefs").await.expect("remove succeeds"));
        assert!(!storage.remove("prefs").await.expect("remove succeeds"));
        assert_eq!(storage.retrieve("prefs").await.expect("ok"), None);
    }
}
