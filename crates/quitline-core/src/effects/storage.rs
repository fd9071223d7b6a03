//! Byte-blob storage trait for client-side persistence

use crate::errors::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

/// Keyed byte-blob storage.
///
/// The preference adapter is the only consumer; it serializes a single
/// blob per key, so the surface stays deliberately small.
#[async_trait]
pub trait StorageEffects: Send + Sync {
    /// Store a value under a key, replacing any previous value.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Retrieve the value for a key, if present.
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove a key, reporting whether it existed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

#[async_trait]
impl<T: StorageEffects + ?Sized> StorageEffects for Arc<T> {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).store(key, value).await
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).retrieve(key).await
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key).await
    }
}
