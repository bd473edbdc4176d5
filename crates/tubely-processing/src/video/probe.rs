//! Media inspection with ffprobe

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::tool::{self, timeout_from_secs};
use crate::error::ProcessingError;

/// Subset of `ffprobe -show_streams` JSON the pipeline relies on.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProbeStream {
    #[serde(default)]
    pub index: u32,
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_aspect_ratio: Option<String>,
}

/// Reads stream metadata from a media file.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProcessingError>;
}

pub struct FfprobeProber {
    ffprobe_path: String,
    timeout: Option<Duration>,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout: timeout_from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProcessingError> {
        let start = std::time::Instant::now();

        let args = [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-print_format"),
            OsStr::new("json"),
            OsStr::new("-show_streams"),
            path.as_os_str(),
        ];
        let output = tool::run(&self.ffprobe_path, args, self.timeout)
            .await
            .map_err(|e| ProcessingError::ProbeFailure(e.to_string()))?;

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout).map_err(|e| {
            ProcessingError::ProbeFailure(format!("Failed to parse ffprobe output: {}", e))
        })?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            streams = probe.streams.len(),
            "Video probe completed"
        );

        Ok(probe)
    }
}

/// Extracts the display aspect ratio the pipeline classifies uploads by.
#[derive(Clone)]
pub struct MediaInspector {
    prober: Arc<dyn Prober>,
}

impl MediaInspector {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// The first stream reporting a non-empty display aspect ratio wins.
    pub async fn aspect_ratio(&self, path: &Path) -> Result<String, ProcessingError> {
        let probe = self.prober.probe(path).await?;

        probe
            .streams
            .into_iter()
            .find_map(|stream| stream.display_aspect_ratio.filter(|ratio| !ratio.is_empty()))
            .ok_or_else(|| ProcessingError::NoAspectRatio(path.to_path_buf()))
    }
}
