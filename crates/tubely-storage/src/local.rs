use crate::signing::AssetUrlSigner;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use crate::{ObjectReference, StorageBackend};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

/// Logical bucket name reported by the local backend.
pub const LOCAL_BUCKET: &str = "local";

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    signer: AssetUrlSigner,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/tubely/assets")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8091/assets")
    /// * `signer` - Signs the temporary URLs handed out for stored references
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        signer: AssetUrlSigner,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
            signer,
        })
    }

    /// Convert storage key to filesystem path, rejecting traversal outside the base directory
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('/')
            || key.contains('\\')
            || key.split('/').any(|segment| segment == ".." || segment == ".")
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<u64> {
        let target = self.key_to_path(key)?;
        self.ensure_parent_dir(&target).await?;

        let start = std::time::Instant::now();

        let mut source = fs::File::open(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut file = fs::File::create(&target).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", target.display(), e))
        })?;

        let size = tokio::io::copy(&mut source, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", target.display(), e))
        })?;

        file.flush().await?;
        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", target.display(), e))
        })?;

        tracing::info!(
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload successful"
        );

        Ok(size)
    }

    fn public_url(&self, key: &str) -> String {
        self.generate_url(key)
    }

    fn bucket(&self) -> &str {
        LOCAL_BUCKET
    }

    async fn get_presigned_url(
        &self,
        reference: &ObjectReference,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if reference.bucket != LOCAL_BUCKET {
            return Err(StorageError::NotFound(format!(
                "Unknown bucket for local storage: {}",
                reference.bucket
            )));
        }
        self.key_to_path(&reference.key)?;
        self.signer
            .signed_url(&self.base_url, &reference.key, expires_in)
    }

    async fn download_stream(&self, key: &str) -> StorageResult<(ByteStream, u64)> {
        let path = self.key_to_path(key)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StorageError::DownloadFailed(e.to_string())),
        };

        let size = file.metadata().await?.len();
        let stream = ReaderStream::new(file)
            .map(|chunk| chunk.map_err(|e| StorageError::DownloadFailed(e.to_string())));

        Ok((Box::pin(stream), size))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
