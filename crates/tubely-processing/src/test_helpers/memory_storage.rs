use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use tubely_storage::{
    ByteStream, ObjectReference, Storage, StorageBackend, StorageError, StorageResult,
};

/// A stored object as seen by tests.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Storage implementation that keeps objects in memory
pub struct MemoryStorage {
    bucket: String,
    base_url: String,
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    fail_uploads: AtomicBool,
    presign_calls: AtomicUsize,
}

impl MemoryStorage {
    pub fn new(bucket: &str, base_url: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            fail_uploads: AtomicBool::new(false),
            presign_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent upload fail.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn presign_calls(&self) -> usize {
        self.presign_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("tubely-test", "https://tubely-test.s3.us-east-1.amazonaws.com")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<u64> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "simulated store outage".to_string(),
            ));
        }
        let data = tokio::fs::read(path).await?;
        let size = data.len() as u64;
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(size)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn get_presigned_url(
        &self,
        reference: &ObjectReference,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://{}.example.com/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            reference.bucket,
            reference.key,
            expires_in.as_secs()
        ))
    }

    async fn download_stream(&self, key: &str) -> StorageResult<(ByteStream, u64)> {
        let object = self
            .object(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        let size = object.data.len() as u64;
        let chunks = stream::iter(vec![Ok(Bytes::from(object.data))]);
        Ok((Box::pin(chunks), size))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
