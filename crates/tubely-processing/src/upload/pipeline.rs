//! The upload orchestrator.
//!
//! Drives one upload through `Validating → Staging → Normalizing → Probing →
//! KeyDerivation → Uploading → RecordUpdate → Done`. Any stage may end the run in
//! `Failed`; scratch files are owned by the run and removed on every exit path.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::{Stream, StreamExt};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tubely_core::constants::{DEFAULT_MAX_VIDEO_SIZE_BYTES, DEFAULT_VIDEO_CONTENT_TYPE};
use tubely_core::models::Video;
use tubely_core::VideoPipelineSettings;
use tubely_db::VideoRepository;
use tubely_storage::Storage;
use uuid::Uuid;

use super::error::UploadError;
use super::strategy::KeyUrlStrategy;
use crate::error::ProcessingError;
use crate::scratch::{ScratchFile, ScratchSpace};
use crate::video::{AspectClass, FastStartNormalizer, MediaInspector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Validating,
    Staging,
    Normalizing,
    Probing,
    KeyDerivation,
    Uploading,
    RecordUpdate,
    Done,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            UploadStage::Validating => "validating",
            UploadStage::Staging => "staging",
            UploadStage::Normalizing => "normalizing",
            UploadStage::Probing => "probing",
            UploadStage::KeyDerivation => "key_derivation",
            UploadStage::Uploading => "uploading",
            UploadStage::RecordUpdate => "record_update",
            UploadStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Settings the orchestrator runs with.
#[derive(Debug, Clone)]
pub struct UploadPipelineConfig {
    /// The single accepted content type, lowercase, without parameters.
    pub accepted_content_type: String,
    pub max_video_size_bytes: u64,
    pub scratch: ScratchSpace,
}

impl UploadPipelineConfig {
    /// Build from settings, creating the scratch directory if needed.
    pub fn from_settings(settings: &VideoPipelineSettings) -> std::io::Result<Self> {
        Ok(Self {
            accepted_content_type: normalize_content_type(&settings.video_content_type),
            max_video_size_bytes: settings.max_video_size_bytes,
            scratch: ScratchSpace::from_config(settings.scratch_dir.as_deref())?,
        })
    }
}

impl Default for UploadPipelineConfig {
    fn default() -> Self {
        Self {
            accepted_content_type: DEFAULT_VIDEO_CONTENT_TYPE.to_string(),
            max_video_size_bytes: DEFAULT_MAX_VIDEO_SIZE_BYTES,
            scratch: ScratchSpace::new(std::env::temp_dir()),
        }
    }
}

/// One upload: who is uploading, into which video, and the bytes.
pub struct UploadRequest<S> {
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub content_type: String,
    pub body: S,
}

/// Strip MIME parameters and lowercase: `Video/MP4; codecs=avc1` → `video/mp4`.
fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

#[derive(Clone)]
pub struct UploadOrchestrator {
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    inspector: MediaInspector,
    normalizer: FastStartNormalizer,
    strategy: Arc<dyn KeyUrlStrategy>,
    config: UploadPipelineConfig,
}

impl UploadOrchestrator {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        inspector: MediaInspector,
        normalizer: FastStartNormalizer,
        strategy: Arc<dyn KeyUrlStrategy>,
        config: UploadPipelineConfig,
    ) -> Self {
        Self {
            repository,
            storage,
            inspector,
            normalizer,
            strategy,
            config,
        }
    }

    /// Run the pipeline and return the updated video record.
    pub async fn upload<S>(&self, request: UploadRequest<S>) -> Result<Video, UploadError>
    where
        S: Stream<Item = io::Result<Bytes>> + Send,
    {
        let video_id = request.video_id;
        let user_id = request.user_id;
        let started = std::time::Instant::now();
        let mut stage = UploadStage::Validating;

        let result = self.run(request, &mut stage).await;

        match &result {
            Ok(video) => {
                tracing::info!(
                    video_id = %video_id,
                    user_id = %user_id,
                    stage = %UploadStage::Done,
                    video_url = video.video_url.as_deref().unwrap_or_default(),
                    duration_ms = started.elapsed().as_millis(),
                    "Video upload completed"
                );
            }
            Err(err @ UploadError::RecordUpdate { key, .. }) => {
                tracing::error!(
                    video_id = %video_id,
                    stage = %stage,
                    orphaned_key = %key,
                    error = %err,
                    "Video upload failed after object was stored; object is orphaned"
                );
            }
            Err(
                err @ (UploadError::VideoNotFound(_)
                | UploadError::NotOwner { .. }
                | UploadError::UnsupportedContentType { .. }
                | UploadError::Processing(ProcessingError::PayloadTooLarge { .. })),
            ) => {
                tracing::warn!(
                    video_id = %video_id,
                    user_id = %user_id,
                    stage = %stage,
                    error = %err,
                    "Video upload rejected"
                );
            }
            Err(err) => {
                tracing::error!(
                    video_id = %video_id,
                    stage = %stage,
                    error = %err,
                    duration_ms = started.elapsed().as_millis(),
                    "Video upload failed"
                );
            }
        }

        result
    }

    async fn run<S>(
        &self,
        request: UploadRequest<S>,
        stage: &mut UploadStage,
    ) -> Result<Video, UploadError>
    where
        S: Stream<Item = io::Result<Bytes>> + Send,
    {
        let UploadRequest {
            user_id,
            video_id,
            content_type,
            body,
        } = request;

        advance(stage, UploadStage::Validating, video_id);
        let mut video = self.authorize(video_id, user_id).await?;
        let content_type = self.check_content_type(&content_type)?;

        advance(stage, UploadStage::Staging, video_id);
        let staged = self.stage_body(body).await?;

        advance(stage, UploadStage::Normalizing, video_id);
        let normalized = self.normalizer.normalize(&staged).await?;
        drop(staged);

        advance(stage, UploadStage::Probing, video_id);
        let ratio = self.inspector.aspect_ratio(normalized.path()).await?;

        advance(stage, UploadStage::KeyDerivation, video_id);
        let class = AspectClass::classify(&ratio);
        let key = self.strategy.key_for(class, &content_type);
        tracing::debug!(
            video_id = %video_id,
            aspect_ratio = %ratio,
            aspect_class = %class,
            key = %key,
            "Derived storage key"
        );

        advance(stage, UploadStage::Uploading, video_id);
        self.storage
            .upload_file(&key, normalized.path(), &content_type)
            .await
            .map_err(|source| UploadError::Store {
                key: key.clone(),
                source,
            })?;
        drop(normalized);

        advance(stage, UploadStage::RecordUpdate, video_id);
        video.video_url = Some(self.strategy.access_url(&key));
        video.updated_at = Utc::now();
        let updated = self
            .repository
            .update_video(&video)
            .await
            .map_err(|source| UploadError::RecordUpdate {
                video_id,
                key: key.clone(),
                source,
            })?;

        *stage = UploadStage::Done;
        Ok(updated)
    }

    async fn authorize(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, UploadError> {
        let video = self
            .repository
            .get_video(video_id)
            .await
            .map_err(|source| UploadError::Lookup { video_id, source })?
            .ok_or(UploadError::VideoNotFound(video_id))?;

        if !video.is_owned_by(user_id) {
            return Err(UploadError::NotOwner { video_id, user_id });
        }

        Ok(video)
    }

    fn check_content_type(&self, declared: &str) -> Result<String, UploadError> {
        let normalized = normalize_content_type(declared);
        if normalized != self.config.accepted_content_type {
            return Err(UploadError::UnsupportedContentType {
                actual: declared.to_string(),
                expected: self.config.accepted_content_type.clone(),
            });
        }
        Ok(normalized)
    }

    /// Copy the body into a fresh scratch file, enforcing the size ceiling as bytes arrive.
    async fn stage_body<S>(&self, body: S) -> Result<ScratchFile, ProcessingError>
    where
        S: Stream<Item = io::Result<Bytes>> + Send,
    {
        let limit = self.config.max_video_size_bytes;
        let (mut file, scratch) = self
            .config
            .scratch
            .create(".upload")
            .map_err(|e| ProcessingError::Staging(format!("Failed to create scratch file: {}", e)))?;

        let mut body = std::pin::pin!(body);
        let mut written: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| ProcessingError::Staging(e.to_string()))?;
            written += chunk.len() as u64;
            if written > limit {
                return Err(ProcessingError::PayloadTooLarge { limit });
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| ProcessingError::Staging(e.to_string()))?;
        }

        file.flush()
            .await
            .map_err(|e| ProcessingError::Staging(e.to_string()))?;
        file.rewind()
            .await
            .map_err(|e| ProcessingError::Staging(e.to_string()))?;

        tracing::debug!(size_bytes = written, path = %scratch.path().display(), "Upload staged");

        Ok(scratch)
    }
}

fn advance(stage: &mut UploadStage, next: UploadStage, video_id: Uuid) {
    *stage = next;
    tracing::debug!(video_id = %video_id, stage = %next, "Upload stage entered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FakeProber, FakeRemuxer, MemoryStorage, RemuxBehavior};
    use crate::upload::strategy::{DirectUrlStrategy, ObjectReferenceStrategy};
    use crate::video::{Prober, Remuxer};
    use async_trait::async_trait;
    use futures::stream;
    use tempfile::TempDir;
    use tubely_core::{AppError, ErrorMetadata};
    use tubely_db::MemoryVideoRepository;

    const BASE_URL: &str = "https://tubely-videos.s3.us-east-1.amazonaws.com";

    struct Harness {
        scratch_dir: TempDir,
        repository: Arc<MemoryVideoRepository>,
        storage: Arc<MemoryStorage>,
        prober: Arc<FakeProber>,
        remuxer: Arc<FakeRemuxer>,
        owner: Uuid,
        video: Video,
    }

    impl Harness {
        async fn new(prober: FakeProber, remux: RemuxBehavior) -> Self {
            let repository = Arc::new(MemoryVideoRepository::new());
            let owner = Uuid::new_v4();
            let video = Video::new(owner, "Boots", "Boot review");
            repository.create_video(&video).await.unwrap();

            Self {
                scratch_dir: TempDir::new().unwrap(),
                repository,
                storage: Arc::new(MemoryStorage::new("tubely-videos", BASE_URL)),
                prober: Arc::new(prober),
                remuxer: Arc::new(FakeRemuxer::new(remux)),
                owner,
                video,
            }
        }

        fn orchestrator_with(
            &self,
            repository: Arc<dyn VideoRepository>,
            max_video_size_bytes: u64,
        ) -> UploadOrchestrator {
            let scratch = ScratchSpace::new(self.scratch_dir.path());
            let prober: Arc<dyn Prober> = self.prober.clone();
            let remuxer: Arc<dyn Remuxer> = self.remuxer.clone();
            UploadOrchestrator::new(
                repository,
                self.storage.clone(),
                MediaInspector::new(prober),
                FastStartNormalizer::new(remuxer, scratch.clone()),
                Arc::new(DirectUrlStrategy::new(self.storage.clone())),
                UploadPipelineConfig {
                    accepted_content_type: "video/mp4".to_string(),
                    max_video_size_bytes,
                    scratch,
                },
            )
        }

        fn orchestrator(&self) -> UploadOrchestrator {
            self.orchestrator_with(self.repository.clone(), 1024 * 1024)
        }

        fn request(
            &self,
            content_type: &str,
            chunks: Vec<io::Result<Bytes>>,
        ) -> UploadRequest<impl Stream<Item = io::Result<Bytes>> + Send> {
            UploadRequest {
                user_id: self.owner,
                video_id: self.video.id,
                content_type: content_type.to_string(),
                body: stream::iter(chunks),
            }
        }

        fn scratch_entries(&self) -> usize {
            std::fs::read_dir(self.scratch_dir.path()).unwrap().count()
        }

        async fn stored_video(&self) -> Video {
            self.repository
                .get_video(self.video.id)
                .await
                .unwrap()
                .unwrap()
        }
    }

    fn body(len: usize) -> Vec<io::Result<Bytes>> {
        vec![Ok(Bytes::from(vec![7u8; len]))]
    }

    struct FailingRepository {
        inner: Arc<MemoryVideoRepository>,
    }

    #[async_trait]
    impl VideoRepository for FailingRepository {
        async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
            self.inner.create_video(video).await
        }

        async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
            self.inner.get_video(id).await
        }

        async fn update_video(&self, _video: &Video) -> Result<Video, AppError> {
            Err(AppError::Internal("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_successful_upload_records_direct_url() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let orchestrator = harness.orchestrator();

        let updated = orchestrator
            .upload(harness.request("video/mp4", body(4096)))
            .await
            .unwrap();

        let keys = harness.storage.keys();
        assert_eq!(keys.len(), 1);
        let key = &keys[0];
        assert!(key.starts_with("landscape/"));
        assert!(key.ends_with(".mp4"));
        assert_eq!(key.len(), "landscape/".len() + 43 + ".mp4".len());

        let object = harness.storage.object(key).unwrap();
        assert_eq!(object.data.len(), 4096);
        assert_eq!(object.content_type, "video/mp4");

        let expected_url = format!("{}/{}", BASE_URL, key);
        assert_eq!(updated.video_url.as_deref(), Some(expected_url.as_str()));
        assert_eq!(harness.stored_video().await.video_url, updated.video_url);
        assert!(updated.updated_at >= harness.video.updated_at);
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_content_type_parameters_are_accepted() {
        let harness = Harness::new(FakeProber::with_ratio("9:16"), RemuxBehavior::Copy).await;
        let updated = harness
            .orchestrator()
            .upload(harness.request("Video/MP4; codecs=\"avc1\"", body(10)))
            .await
            .unwrap();
        assert!(updated.video_url.unwrap().contains("/portrait/"));
    }

    #[tokio::test]
    async fn test_other_ratio_uses_other_prefix() {
        let harness = Harness::new(FakeProber::with_ratio("4:3"), RemuxBehavior::Copy).await;
        harness
            .orchestrator()
            .upload(harness.request("video/mp4", body(10)))
            .await
            .unwrap();
        assert!(harness.storage.keys()[0].starts_with("other/"));
    }

    #[tokio::test]
    async fn test_wrong_content_type_rejected_before_staging() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let orchestrator = harness.orchestrator();

        for content_type in ["image/png", "video/quicktime", "", "mp4"] {
            let err = orchestrator
                .upload(harness.request(content_type, body(10)))
                .await
                .unwrap_err();
            assert!(
                matches!(err, UploadError::UnsupportedContentType { .. }),
                "{}",
                content_type
            );
        }

        assert_eq!(harness.scratch_entries(), 0);
        assert_eq!(harness.remuxer.calls(), 0);
        assert_eq!(harness.storage.object_count(), 0);
        assert_eq!(harness.stored_video().await, harness.video);
    }

    #[tokio::test]
    async fn test_ownership_enforced() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let orchestrator = harness.orchestrator();

        // Owns a video of their own, just not this one.
        let other_owner = Uuid::new_v4();
        let other = Video::new(other_owner, "Laces", "Lace review");
        harness.repository.create_video(&other).await.unwrap();

        for intruder in [Uuid::new_v4(), other_owner, Uuid::nil()] {
            let mut request = harness.request("video/mp4", body(10));
            request.user_id = intruder;
            let err = orchestrator.upload(request).await.unwrap_err();
            assert!(matches!(err, UploadError::NotOwner { .. }), "{}", intruder);
            assert_eq!(AppError::from(err).error_code(), "FORBIDDEN");
        }
        assert_eq!(harness.prober.calls(), 0);
        assert_eq!(harness.remuxer.calls(), 0);

        // The rightful owner of one video cannot write into another.
        let mut request = harness.request("video/mp4", body(10));
        request.video_id = other.id;
        let err = orchestrator.upload(request).await.unwrap_err();
        assert!(matches!(err, UploadError::NotOwner { .. }));
        assert_eq!(
            harness.repository.get_video(other.id).await.unwrap().unwrap(),
            other
        );

        let mut request = harness.request("video/mp4", body(10));
        request.video_id = Uuid::new_v4();
        let err = orchestrator.upload(request).await.unwrap_err();
        assert!(matches!(err, UploadError::VideoNotFound(_)));

        assert_eq!(harness.storage.object_count(), 0);
        assert_eq!(harness.stored_video().await, harness.video);
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_oversize_body_aborts_staging() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let orchestrator = harness.orchestrator_with(harness.repository.clone(), 100);

        let chunks = vec![
            Ok(Bytes::from(vec![0u8; 60])),
            Ok(Bytes::from(vec![0u8; 60])),
        ];
        let err = orchestrator
            .upload(harness.request("video/mp4", chunks))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Processing(ProcessingError::PayloadTooLarge { limit: 100 })
        ));
        assert_eq!(harness.remuxer.calls(), 0);
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_body_exactly_at_limit_is_accepted() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let orchestrator = harness.orchestrator_with(harness.repository.clone(), 100);
        orchestrator
            .upload(harness.request("video/mp4", body(100)))
            .await
            .unwrap();
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_stream_error_is_staging_failure() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
        ];
        let err = harness
            .orchestrator()
            .upload(harness.request("video/mp4", chunks))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::Processing(ProcessingError::Staging(_))
        ));
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_remux_failure_and_empty_output() {
        for (behavior, expected_code) in [
            (RemuxBehavior::Fail, "REMUX_FAILURE"),
            (RemuxBehavior::Empty, "EMPTY_OUTPUT"),
        ] {
            let harness = Harness::new(FakeProber::with_ratio("16:9"), behavior).await;
            let err = harness
                .orchestrator()
                .upload(harness.request("video/mp4", body(10)))
                .await
                .unwrap_err();

            assert_eq!(AppError::from(err).error_code(), expected_code);
            assert_eq!(harness.prober.calls(), 0);
            assert_eq!(harness.storage.object_count(), 0);
            assert_eq!(harness.scratch_entries(), 0);
        }
    }

    #[tokio::test]
    async fn test_probe_failures_prevent_store_write() {
        for prober in [FakeProber::without_ratio(), FakeProber::failing("invalid data")] {
            let harness = Harness::new(prober, RemuxBehavior::Copy).await;
            let err = harness
                .orchestrator()
                .upload(harness.request("video/mp4", body(10)))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                UploadError::Processing(
                    ProcessingError::NoAspectRatio(_) | ProcessingError::ProbeFailure(_)
                )
            ));
            assert_eq!(harness.storage.object_count(), 0);
            assert_eq!(harness.stored_video().await, harness.video);
            assert_eq!(harness.scratch_entries(), 0);
        }
    }

    #[tokio::test]
    async fn test_store_failure_leaves_record_untouched() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        harness.storage.fail_uploads();

        let err = harness
            .orchestrator()
            .upload(harness.request("video/mp4", body(10)))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Store { .. }));
        assert_eq!(AppError::from(err).http_status_code(), 502);
        assert_eq!(harness.stored_video().await, harness.video);
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_record_update_failure_reports_orphaned_key() {
        let harness = Harness::new(FakeProber::with_ratio("16:9"), RemuxBehavior::Copy).await;
        let failing = Arc::new(FailingRepository {
            inner: harness.repository.clone(),
        });
        let orchestrator = harness.orchestrator_with(failing, 1024);

        let err = orchestrator
            .upload(harness.request("video/mp4", body(10)))
            .await
            .unwrap_err();

        match &err {
            UploadError::RecordUpdate { key, .. } => {
                assert!(harness.storage.object(key).is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(AppError::from(err).error_code(), "RECORD_UPDATE_ERROR");
        assert_eq!(harness.scratch_entries(), 0);
    }

    #[tokio::test]
    async fn test_presigned_delivery_records_reference_token() {
        let harness = Harness::new(FakeProber::with_ratio("9:16"), RemuxBehavior::Copy).await;
        let scratch = ScratchSpace::new(harness.scratch_dir.path());
        let prober: Arc<dyn Prober> = harness.prober.clone();
        let remuxer: Arc<dyn Remuxer> = harness.remuxer.clone();
        let orchestrator = UploadOrchestrator::new(
            harness.repository.clone(),
            harness.storage.clone(),
            MediaInspector::new(prober),
            FastStartNormalizer::new(remuxer, scratch.clone()),
            Arc::new(ObjectReferenceStrategy::new(harness.storage.clone())),
            UploadPipelineConfig {
                accepted_content_type: "video/mp4".to_string(),
                max_video_size_bytes: 1024,
                scratch,
            },
        );

        let updated = orchestrator
            .upload(harness.request("video/mp4", body(10)))
            .await
            .unwrap();

        let key = &harness.storage.keys()[0];
        assert_eq!(
            updated.video_url.as_deref(),
            Some(format!("tubely-videos,{}", key).as_str())
        );
        assert_eq!(harness.storage.presign_calls(), 0);
    }

    #[test]
    fn test_normalize_content_type() {
        assert_eq!(normalize_content_type("Video/MP4; codecs=avc1"), "video/mp4");
        assert_eq!(normalize_content_type(" video/mp4 "), "video/mp4");
        assert_eq!(normalize_content_type(""), "");
    }

    #[test]
    fn test_config_from_settings() {
        let root = TempDir::new().unwrap();
        let scratch_dir = root.path().join("tubely");
        let settings = VideoPipelineSettings {
            max_video_size_bytes: 42,
            video_content_type: "Video/MP4".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            media_tool_timeout_secs: 0,
            scratch_dir: Some(scratch_dir.clone()),
            delivery: tubely_core::DeliveryMode::Direct,
            presigned_url_ttl_secs: 120,
        };
        let config = UploadPipelineConfig::from_settings(&settings).unwrap();
        assert_eq!(config.accepted_content_type, "video/mp4");
        assert_eq!(config.max_video_size_bytes, 42);
        assert_eq!(config.scratch.dir(), scratch_dir.as_path());
        assert!(scratch_dir.is_dir());
    }
}
