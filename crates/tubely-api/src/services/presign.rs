//! Short-lived read URLs for stored objects.

use std::sync::Arc;
use std::time::Duration;

use tubely_core::{AppError, DeliveryMode, ObjectReference, Video};
use tubely_storage::Storage;

use crate::error::HttpAppError;

/// Turns `bucket,key` reference tokens into time-limited GET URLs.
#[derive(Clone)]
pub struct PresignedAccessIssuer {
    storage: Arc<dyn Storage>,
    ttl: Duration,
    mode: DeliveryMode,
}

impl PresignedAccessIssuer {
    pub fn new(storage: Arc<dyn Storage>, ttl: Duration, mode: DeliveryMode) -> Self {
        Self { storage, ttl, mode }
    }

    /// Presign a reference token. Malformed tokens fail before the store is asked to sign.
    pub async fn presign(&self, token: &str) -> Result<String, HttpAppError> {
        let reference = ObjectReference::parse(token)?;
        let url = self
            .storage
            .get_presigned_url(&reference, self.ttl)
            .await?;
        tracing::debug!(
            bucket = %reference.bucket,
            key = %reference.key,
            ttl_secs = self.ttl.as_secs(),
            "Issued presigned URL"
        );
        Ok(url)
    }

    /// Copy of `video` with its reference token replaced by a presigned URL.
    ///
    /// Outside presigned delivery the stored URL is already final and is returned as is.
    /// A video without a URL yet is returned unchanged.
    pub async fn sign_video(&self, video: Video) -> Result<Video, HttpAppError> {
        if self.mode != DeliveryMode::Presigned {
            return Ok(video);
        }
        let Some(token) = video.video_url.as_deref() else {
            return Ok(video);
        };
        let url = self.presign(token).await.map_err(|err| match err.0 {
            AppError::MalformedReference(msg) => HttpAppError(AppError::Internal(format!(
                "Stored video reference is malformed: {}",
                msg
            ))),
            other => HttpAppError(other),
        })?;
        Ok(Video {
            video_url: Some(url),
            ..video
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_processing::test_helpers::MemoryStorage;
    use uuid::Uuid;

    fn issuer(storage: Arc<MemoryStorage>, mode: DeliveryMode) -> PresignedAccessIssuer {
        PresignedAccessIssuer::new(storage, Duration::from_secs(120), mode)
    }

    #[tokio::test]
    async fn test_presign_valid_token() {
        let storage = Arc::new(MemoryStorage::default());
        let url = issuer(storage.clone(), DeliveryMode::Presigned)
            .presign("tubely-videos,landscape/abc.mp4")
            .await
            .unwrap();
        assert!(url.starts_with("https://tubely-videos.example.com/landscape/abc.mp4?"));
        assert!(url.contains("X-Amz-Expires=120"));
        assert_eq!(storage.presign_calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_token_never_reaches_signer() {
        let storage = Arc::new(MemoryStorage::default());
        let issuer = issuer(storage.clone(), DeliveryMode::Presigned);
        for token in ["bucket-a", "a,b,c", ",key", "bucket,", ""] {
            let err = issuer.presign(token).await.unwrap_err();
            assert!(
                matches!(err.0, AppError::MalformedReference(_)),
                "token {:?}",
                token
            );
        }
        assert_eq!(storage.presign_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_video_replaces_reference() {
        let storage = Arc::new(MemoryStorage::default());
        let mut video = Video::new(Uuid::new_v4(), "clip", "");
        video.video_url = Some("tubely-test,portrait/xyz.mp4".to_string());

        let signed = issuer(storage, DeliveryMode::Presigned)
            .sign_video(video.clone())
            .await
            .unwrap();
        assert_eq!(signed.id, video.id);
        assert!(signed
            .video_url
            .unwrap()
            .starts_with("https://tubely-test.example.com/portrait/xyz.mp4?"));
    }

    #[tokio::test]
    async fn test_sign_video_passes_through_other_modes() {
        let storage = Arc::new(MemoryStorage::default());
        let mut video = Video::new(Uuid::new_v4(), "clip", "");
        video.video_url = Some("https://cdn.example.com/other/a.mp4".to_string());

        let out = issuer(storage.clone(), DeliveryMode::Cdn)
            .sign_video(video.clone())
            .await
            .unwrap();
        assert_eq!(out, video);
        assert_eq!(storage.presign_calls(), 0);
    }
}
