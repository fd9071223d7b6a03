//! Filesystem storage handler
//!
//! One file per key under a root directory. Keys may contain `/` to form
//! subdirectories; path escapes are rejected.

use async_trait::async_trait;
use quitline_core::effects::StorageEffects;
use quitline_core::StorageError;
use std::path::{Component, Path, PathBuf};

/// Filesystem-backed storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FilesystemStorageHandler {
    root: PathBuf,
}

impl FilesystemStorageHandler {
    /// Create a handler rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(StorageError::Backend(format!("invalid storage key '{key}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl StorageEffects for FilesystemStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}
