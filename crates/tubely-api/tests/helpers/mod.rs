#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::setup::{routes, services};
use tubely_core::config::{AppConfig, BaseConfig, VideoPipelineSettings};
use tubely_core::{Config, DeliveryMode, StorageBackend, Video};
use tubely_db::{MemoryVideoRepository, VideoRepository};
use tubely_processing::test_helpers::{FakeProber, FakeRemuxer, MemoryStorage, RemuxBehavior};
use tubely_storage::{AssetUrlSigner, LocalStorage, Storage};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";
pub const SIGNING_SECRET: &str = "asset-signing-secret-for-tests";
pub const S3_BASE_URL: &str = "https://tubely-test.s3.us-east-1.amazonaws.com";
pub const LOCAL_BASE_URL: &str = "http://localhost:8091/assets";

pub struct TestAppOptions {
    pub delivery: DeliveryMode,
    pub max_video_size_bytes: u64,
    pub ratio: Option<&'static str>,
    pub remux: RemuxBehavior,
    pub local_storage: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::Direct,
            max_video_size_bytes: 64 * 1024 * 1024,
            ratio: Some("16:9"),
            remux: RemuxBehavior::Copy,
            local_storage: false,
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repository: MemoryVideoRepository,
    /// Set unless the app runs on the local filesystem backend.
    pub memory_storage: Option<Arc<MemoryStorage>>,
    pub prober: Arc<FakeProber>,
    pub remuxer: Arc<FakeRemuxer>,
    pub jwt: JwtService,
    scratch_dir: TempDir,
    _storage_dir: TempDir,
}

impl TestApp {
    pub async fn create_video(&self, owner: Uuid) -> Video {
        self.repository
            .create_video(&Video::new(owner, "Boots", "A video about boots"))
            .await
            .expect("Failed to create video")
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.repository
            .get_video(id)
            .await
            .expect("Failed to load video")
            .expect("Video missing")
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt.issue(user_id).expect("Failed to issue token")
    }

    pub fn storage(&self) -> &MemoryStorage {
        self.memory_storage
            .as_deref()
            .expect("App runs on local storage")
    }

    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path())
            .expect("Failed to read scratch dir")
            .count()
    }
}

pub fn video_form(len: usize, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(vec![0x2a_u8; len])
        .file_name("boots.mp4")
        .mime_type(mime_type);
    MultipartForm::new()
        .add_text("title", "Boots")
        .add_part("video", part)
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let scratch_dir = TempDir::new().expect("Failed to create scratch dir");
    let storage_dir = TempDir::new().expect("Failed to create storage dir");

    let config = create_test_config(&options, scratch_dir.path().to_path_buf(), &storage_dir);

    let repository = MemoryVideoRepository::new();
    let (storage, memory_storage, asset_signer) = if options.local_storage {
        let signer = AssetUrlSigner::new(SIGNING_SECRET);
        let local = LocalStorage::new(
            storage_dir.path().to_path_buf(),
            LOCAL_BASE_URL.to_string(),
            signer.clone(),
        )
        .await
        .expect("Failed to create local storage");
        let storage: Arc<dyn Storage> = Arc::new(local);
        (storage, None, Some(signer))
    } else {
        let memory = Arc::new(MemoryStorage::new("tubely-test", S3_BASE_URL));
        let storage: Arc<dyn Storage> = memory.clone();
        (storage, Some(memory), None)
    };

    let prober = Arc::new(match options.ratio {
        Some(ratio) => FakeProber::with_ratio(ratio),
        None => FakeProber::without_ratio(),
    });
    let remuxer = Arc::new(FakeRemuxer::new(options.remux));

    let state = services::build_state(
        &config,
        Arc::new(repository.clone()),
        storage,
        asset_signer,
        prober.clone(),
        remuxer.clone(),
    )
    .expect("Failed to build state");

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        repository,
        memory_storage,
        prober,
        remuxer,
        jwt: JwtService::new(JWT_SECRET),
        scratch_dir,
        _storage_dir: storage_dir,
    }
}

/// Build application state around `scratch_dir` without starting a server.
pub fn build_state_with_scratch_dir(scratch_dir: PathBuf) -> anyhow::Result<()> {
    let options = TestAppOptions::default();
    let storage_dir = TempDir::new().expect("Failed to create storage dir");
    let config = create_test_config(&options, scratch_dir, &storage_dir);
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new("tubely-test", S3_BASE_URL));

    services::build_state(
        &config,
        Arc::new(MemoryVideoRepository::new()),
        storage,
        None,
        Arc::new(FakeProber::with_ratio("16:9")),
        Arc::new(FakeRemuxer::new(RemuxBehavior::Copy)),
    )
    .map(|_| ())
}

fn create_test_config(
    options: &TestAppOptions,
    scratch_dir: PathBuf,
    storage_dir: &TempDir,
) -> Config {
    let base = BaseConfig {
        server_port: 3000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: JWT_SECRET.to_string(),
        database_url: None,
        db_max_connections: 5,
        db_timeout_seconds: 30,
        log_format: "compact".to_string(),
        http_concurrency_limit: 100,
    };

    let (storage_backend, s3_bucket, local_storage_path, local_storage_base_url) =
        if options.local_storage {
            (
                StorageBackend::Local,
                None,
                Some(storage_dir.path().display().to_string()),
                Some(LOCAL_BASE_URL.to_string()),
            )
        } else {
            (StorageBackend::S3, Some("tubely-test".to_string()), None, None)
        };

    Config(Box::new(AppConfig {
        base,
        storage_backend,
        s3_bucket,
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        aws_region: None,
        cdn_distribution: Some("d111111abcdef8.cloudfront.net".to_string()),
        local_storage_path,
        local_storage_base_url,
        asset_signing_secret: SIGNING_SECRET.to_string(),
        pipeline: VideoPipelineSettings {
            max_video_size_bytes: options.max_video_size_bytes,
            video_content_type: "video/mp4".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            media_tool_timeout_secs: 0,
            scratch_dir: Some(scratch_dir),
            delivery: options.delivery,
            presigned_url_ttl_secs: 120,
        },
    }))
}
