//! Attachment Manager
//!
//! Owns the lifecycle of uploaded files and the references records carry.
//! A reference is the public URL path of a stored file, `<public_path>/<key>`.

use std::sync::Arc;

use bytes::Bytes;
use roster_core::RosterError;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::storage::{
    generate_disk_filename, guess_content_type, FileMetadata, Storage, StorageError,
};

/// Attempts at writing under a fresh disk filename before giving up
const MAX_KEY_ATTEMPTS: usize = 3;

/// Key looked up by health checks; never written
const HEALTH_PROBE_KEY: &str = "health-check";

/// Manager errors
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Attachment not found: {0}")]
    NotFound(String),
    #[error("Invalid attachment reference: {0}")]
    InvalidReference(String),
    #[error("Could not allocate a unique name for {0}")]
    KeyExhausted(String),
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

impl From<AttachmentError> for RosterError {
    fn from(err: AttachmentError) -> Self {
        RosterError::storage(err.to_string())
    }
}

/// Attachment manager
pub struct AttachmentManager {
    storage: Arc<dyn Storage>,
    public_path: String,
}

impl AttachmentManager {
    pub fn new(storage: Arc<dyn Storage>, public_path: impl Into<String>) -> Self {
        let trimmed = public_path.into().trim().trim_matches('/').to_string();
        let public_path = if trimmed.is_empty() {
            trimmed
        } else {
            format!("/{}", trimmed)
        };
        Self {
            storage,
            public_path,
        }
    }

    /// Name of the backing storage, for logging and health reports
    pub fn storage_name(&self) -> &str {
        self.storage.name()
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Persist an upload under a fresh key and return its reference
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store(&self, data: Bytes, original_filename: &str) -> AttachmentResult<String> {
        let (key, metadata) = self.put_fresh(data, original_filename).await?;

        info!(
            key = %key,
            size = metadata.size,
            content_type = %metadata.content_type,
            digest = %metadata.digest,
            storage = self.storage.name(),
            "Attachment stored"
        );

        Ok(self.reference_for(&key))
    }

    /// Remove the file behind a reference. A missing file is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, reference: &str) -> AttachmentResult<()> {
        let key = self.key_for(reference)?;
        self.storage.delete(key).await?;

        debug!(key = %key, "Attachment deleted");
        Ok(())
    }

    /// Read back the bytes of a stored file
    #[instrument(skip(self))]
    pub async fn resolve(&self, reference: &str) -> AttachmentResult<Bytes> {
        let key = self.key_for(reference)?;
        self.storage.get(key).await.map_err(|e| match e {
            StorageError::NotFound(_) => AttachmentError::NotFound(reference.to_string()),
            StorageError::InvalidPath(_) => AttachmentError::InvalidReference(reference.to_string()),
            other => AttachmentError::StorageError(other),
        })
    }

    /// Content type to serve a reference with
    pub fn content_type(&self, reference: &str) -> String {
        guess_content_type(reference)
    }

    /// Build the reference for a storage key
    pub fn reference_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_path, key)
    }

    /// Extract the storage key from a reference issued by this manager
    pub fn key_for<'a>(&self, reference: &'a str) -> AttachmentResult<&'a str> {
        reference
            .strip_prefix(self.public_path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty() && !key.contains('/') && !key.contains(".."))
            .ok_or_else(|| AttachmentError::InvalidReference(reference.to_string()))
    }

    /// Check that the backing storage answers at all
    pub async fn check_storage(&self) -> AttachmentResult<()> {
        self.storage.exists(HEALTH_PROBE_KEY).await?;
        Ok(())
    }

    /// Write under a generated key. The storage refuses existing keys,
    /// so a collision only costs a retry.
    async fn put_fresh(
        &self,
        data: Bytes,
        original_filename: &str,
    ) -> AttachmentResult<(String, FileMetadata)> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = generate_disk_filename(original_filename);
            match self.storage.put(&key, data.clone()).await {
                Ok(metadata) => return Ok((key, metadata)),
                Err(StorageError::AlreadyExists(_)) => {
                    debug!(key = %key, "Disk filename already taken, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AttachmentError::KeyExhausted(original_filename.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Storage that reports every key as taken for the first `taken` writes
    struct CrowdedStorage {
        inner: MemoryStorage,
        taken: usize,
        attempts: AtomicUsize,
    }

    impl CrowdedStorage {
        fn new(taken: usize) -> Self {
            Self {
                inner: MemoryStorage::new(),
                taken,
                attempts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Storage for CrowdedStorage {
        async fn put(&self, key: &str, data: Bytes) -> StorageResult<FileMetadata> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) < self.taken {
                return Err(StorageError::AlreadyExists(key.to_string()));
            }
            self.inner.put(key, data).await
        }

        async fn get(&self, key: &str) -> StorageResult<Bytes> {
            self.inner.get(key).await
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            self.inner.delete(key).await
        }

        async fn exists(&self, _key: &str) -> StorageResult<bool> {
            Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "backend unreachable",
            )))
        }

        fn name(&self) -> &str {
            "crowded"
        }
    }

    fn create_manager() -> (AttachmentManager, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let manager = AttachmentManager::new(storage.clone(), "/uploads");
        (manager, storage)
    }

    #[tokio::test]
    async fn test_store_returns_public_reference() {
        let (manager, storage) = create_manager();

        let reference = manager
            .store(Bytes::from("image bytes"), "avatar.png")
            .await
            .unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".png"));
        assert_eq!(storage.len().await, 1);
        assert_eq!(manager.content_type(&reference), "image/png");
    }

    #[tokio::test]
    async fn test_store_never_reuses_names() {
        let (manager, storage) = create_manager();

        let first = manager.store(Bytes::from("a"), "same.jpg").await.unwrap();
        let second = manager.store(Bytes::from("b"), "same.jpg").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(storage.len().await, 2);
        assert_eq!(manager.resolve(&first).await.unwrap(), Bytes::from("a"));
        assert_eq!(manager.resolve(&second).await.unwrap(), Bytes::from("b"));
    }

    #[tokio::test]
    async fn test_delete_then_resolve_fails() {
        let (manager, storage) = create_manager();

        let reference = manager.store(Bytes::from("bye"), "bye.gif").await.unwrap();
        manager.delete(&reference).await.unwrap();

        assert!(storage.is_empty().await);
        assert!(matches!(
            manager.resolve(&reference).await,
            Err(AttachmentError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (manager, _) = create_manager();

        let reference = manager.store(Bytes::from("x"), "x.png").await.unwrap();
        manager.delete(&reference).await.unwrap();
        manager.delete(&reference).await.unwrap();
        manager.delete("/uploads/never-existed.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_references_rejected() {
        let (manager, _) = create_manager();

        for reference in ["", "/uploads", "/uploads/", "/other/a.png", "/uploads/../etc/passwd"] {
            assert!(
                matches!(
                    manager.delete(reference).await,
                    Err(AttachmentError::InvalidReference(_))
                ),
                "expected InvalidReference for {reference:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_store_retries_taken_names() {
        let storage = Arc::new(CrowdedStorage::new(2));
        let manager = AttachmentManager::new(storage.clone(), "/uploads");

        let reference = manager.store(Bytes::from("c"), "c.png").await.unwrap();

        assert_eq!(storage.attempts.load(Ordering::SeqCst), 3);
        assert_eq!(manager.resolve(&reference).await.unwrap(), Bytes::from("c"));
    }

    #[tokio::test]
    async fn test_store_gives_up_after_repeated_collisions() {
        let manager = AttachmentManager::new(Arc::new(CrowdedStorage::new(usize::MAX)), "/uploads");

        let result = manager.store(Bytes::from("c"), "c.png").await;
        assert!(matches!(result, Err(AttachmentError::KeyExhausted(_))));
    }

    #[tokio::test]
    async fn test_check_storage() {
        let (manager, _) = create_manager();
        manager.check_storage().await.unwrap();

        let manager = AttachmentManager::new(Arc::new(CrowdedStorage::new(0)), "/uploads");
        assert!(manager.check_storage().await.is_err());
    }

    #[test]
    fn test_relative_public_path_made_absolute() {
        let manager = AttachmentManager::new(Arc::new(MemoryStorage::new()), "uploads");
        assert_eq!(manager.public_path(), "/uploads");
        assert_eq!(manager.reference_for("a.png"), "/uploads/a.png");
    }

    #[test]
    fn test_public_path_trailing_slash() {
        let manager = AttachmentManager::new(Arc::new(MemoryStorage::new()), "/files/");
        assert_eq!(manager.reference_for("a.png"), "/files/a.png");
        assert_eq!(manager.key_for("/files/a.png").unwrap(), "a.png");
    }
}
