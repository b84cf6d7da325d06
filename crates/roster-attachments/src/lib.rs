//! # roster-attachments
//!
//! Uploaded file handling for Roster.
//!
//! ## Features
//!
//! - Storage abstraction (local filesystem, in-memory)
//! - Unique disk names for every upload
//! - Stable URL references that records carry
//!
//! ## Example
//!
//! ```rust,ignore
//! use roster_attachments::{AttachmentManager, MemoryStorage};
//! use std::sync::Arc;
//!
//! let manager = AttachmentManager::new(Arc::new(MemoryStorage::new()), "/uploads");
//!
//! let reference = manager.store(bytes::Bytes::from(photo), "avatar.png").await?;
//! let data = manager.resolve(&reference).await?;
//! manager.delete(&reference).await?;
//! ```

pub mod manager;
pub mod storage;

pub use manager::{AttachmentError, AttachmentManager, AttachmentResult};
pub use storage::{
    generate_disk_filename, guess_content_type, FileMetadata, LocalStorage, MemoryStorage,
    Storage, StorageError, StorageResult,
};
