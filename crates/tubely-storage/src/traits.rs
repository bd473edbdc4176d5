//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::{ObjectReference, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of object bytes returned by [`Storage::download_stream`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// Processed videos are written from a file on local disk so that large uploads never
/// have to be held in memory. Keys come from [`crate::keys`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream the file at `path` to `key`, tagging the object with `content_type`.
    /// Returns the number of bytes written.
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<u64>;

    /// URL under which `key` is publicly reachable.
    fn public_url(&self, key: &str) -> String;

    /// Bucket (or logical container) this backend writes to.
    fn bucket(&self) -> &str;

    /// Generate a presigned/temporary GET URL for a stored object reference
    async fn get_presigned_url(
        &self,
        reference: &ObjectReference,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Download a file as a stream along with its size in bytes
    async fn download_stream(&self, key: &str) -> StorageResult<(ByteStream, u64)>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Object reference for `key` in this backend's bucket
    fn reference(&self, key: &str) -> ObjectReference {
        ObjectReference::new(self.bucket(), key)
    }
}
