//! Pipeline and service wiring

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{
    strategy_for, FastStartNormalizer, FfmpegRemuxer, FfprobeProber, MediaInspector, Prober,
    Remuxer, UploadOrchestrator, UploadPipelineConfig,
};
use tubely_storage::{AssetUrlSigner, Storage};

use crate::auth::JwtService;
use crate::services::PresignedAccessIssuer;
use crate::state::AppState;

/// Wire the production media tools into the application state.
pub fn initialize_services(
    config: &Config,
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    asset_signer: Option<AssetUrlSigner>,
) -> Result<Arc<AppState>> {
    let pipeline = config.pipeline();
    let prober: Arc<dyn Prober> = Arc::new(FfprobeProber::new(
        pipeline.ffprobe_path.clone(),
        pipeline.media_tool_timeout_secs,
    ));
    let remuxer: Arc<dyn Remuxer> = Arc::new(FfmpegRemuxer::new(
        pipeline.ffmpeg_path.clone(),
        pipeline.media_tool_timeout_secs,
    ));

    tracing::info!(
        ffmpeg_path = %pipeline.ffmpeg_path,
        ffprobe_path = %pipeline.ffprobe_path,
        media_tool_timeout_secs = pipeline.media_tool_timeout_secs,
        "Media tools configured"
    );

    build_state(config, repository, storage, asset_signer, prober, remuxer)
}

/// Assemble [`AppState`] around the given media tools.
pub fn build_state(
    config: &Config,
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    asset_signer: Option<AssetUrlSigner>,
    prober: Arc<dyn Prober>,
    remuxer: Arc<dyn Remuxer>,
) -> Result<Arc<AppState>> {
    let pipeline = config.pipeline();
    let pipeline_config = UploadPipelineConfig::from_settings(pipeline)
        .context("Failed to prepare scratch directory")?;

    let strategy = strategy_for(
        config.delivery(),
        storage.clone(),
        config.cdn_distribution(),
    )?;

    let orchestrator = UploadOrchestrator::new(
        repository.clone(),
        storage.clone(),
        MediaInspector::new(prober),
        FastStartNormalizer::new(remuxer, pipeline_config.scratch.clone()),
        strategy,
        pipeline_config,
    );

    let presigner = PresignedAccessIssuer::new(
        storage.clone(),
        Duration::from_secs(pipeline.presigned_url_ttl_secs),
        config.delivery(),
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        repository,
        storage,
        orchestrator,
        presigner,
        jwt: Arc::new(JwtService::new(config.jwt_secret())),
        asset_signer,
    }))
}
