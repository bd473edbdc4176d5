use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use crate::{ObjectReference, StorageBackend};
use async_trait::async_trait;
use futures::StreamExt;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{Attribute, Attributes, ObjectStore, ObjectStoreExt, Result as ObjectResult};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<AmazonS3>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

fn build_store(bucket: &str, region: &str, endpoint_url: Option<&str>) -> StorageResult<AmazonS3> {
    let mut builder = AmazonS3Builder::from_env()
        .with_region(region)
        .with_bucket_name(bucket);

    if let Some(endpoint) = endpoint_url {
        let allow_http = endpoint.starts_with("http://");
        builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
    }

    builder
        .build()
        .map_err(|e| StorageError::ConfigError(e.to_string()))
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let store = build_store(&bucket, &region, endpoint_url.as_deref())?;

        Ok(S3Storage {
            store: Arc::new(store),
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for S3 object
    ///
    /// For AWS S3: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers (path-style): {endpoint}/{bucket}/{key}
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<u64> {
        let start = std::time::Instant::now();
        let location = ObjectPath::from(key);

        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        // BufWriter issues a single PUT for small files and switches to multipart above its
        // buffer capacity, so the file is never fully resident in memory.
        let store: Arc<dyn ObjectStore> = self.store.clone();
        let mut writer = BufWriter::new(store, location).with_attributes(attributes);

        let copied = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(size) => writer.shutdown().await.map(|_| size),
            Err(e) => Err(e),
        };

        let size = match copied {
            Ok(size) => size,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(
                        error = %abort_err,
                        bucket = %self.bucket,
                        key = %key,
                        "Failed to abort S3 upload"
                    );
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(size)
    }

    fn public_url(&self, key: &str) -> String {
        self.generate_url(key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_presigned_url(
        &self,
        reference: &ObjectReference,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let location = ObjectPath::from(reference.key.as_str());

        let url_result: ObjectResult<_> = if reference.bucket == self.bucket {
            self.store
                .signed_url(Method::GET, &location, expires_in)
                .await
        } else {
            let store = build_store(&reference.bucket, &self.region, self.endpoint_url.as_deref())?;
            store.signed_url(Method::GET, &location, expires_in).await
        };

        let url = url_result
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?
            .to_string();

        tracing::debug!(
            bucket = %reference.bucket,
            key = %reference.key,
            expires_in_secs = expires_in.as_secs(),
            "Issued S3 presigned URL"
        );

        Ok(url)
    }

    async fn download_stream(&self, key: &str) -> StorageResult<(ByteStream, u64)> {
        let start = std::time::Instant::now();
        let location = ObjectPath::from(key);

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => StorageError::DownloadFailed(other.to_string()),
        })?;

        let size = result.meta.size;
        let bucket = self.bucket.clone();
        let key = key.to_string();

        let stream = result.into_stream().map(move |res| {
            res.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 stream download error"
                );
                StorageError::DownloadFailed(e.to_string())
            })
        });

        Ok((Box::pin(stream), size))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
