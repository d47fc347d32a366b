use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::domain::error::DomainError;

/// Storage backend holding the serialized post collection as one document.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Returns `None` when nothing has been persisted yet.
    async fn read(&self) -> Result<Option<Vec<u8>>, DomainError>;
    async fn write(&self, document: &[u8]) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub struct JsonFilePostStore {
    path: PathBuf,
}

impl JsonFilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "posts file absent, starting empty");
                Ok(None)
            }
            Err(e) => {
                error!("failed to read {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    async fn write(&self, document: &[u8]) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        // Plain overwrite, no temp file + rename.
        tokio::fs::write(&self.path, document).await.map_err(|e| {
            error!("failed to write {}: {}", self.path.display(), e);
            DomainError::from(e)
        })
    }
}

/// Keeps the document in memory. Data is lost when the store is dropped.
#[derive(Default)]
pub struct InMemoryPostStore {
    document: RwLock<Option<Vec<u8>>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
        }
    }

    pub async fn document(&self) -> Option<Vec<u8>> {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn read(&self) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.document.read().await.clone())
    }

    async fn write(&self, document: &[u8]) -> Result<(), DomainError> {
        *self.document.write().await = Some(document.to_vec());
        Ok(())
    }
}
