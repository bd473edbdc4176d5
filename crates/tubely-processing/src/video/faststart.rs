//! Fast-start normalization: stream-copy remux that moves the `moov` atom ahead of the
//! media data so playback can begin before the download completes.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::tool::{self, timeout_from_secs};
use crate::error::ProcessingError;
use crate::scratch::{ScratchFile, ScratchSpace};

/// Rewrites a container without re-encoding.
#[async_trait]
pub trait Remuxer: Send + Sync {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ProcessingError>;
}

pub struct FfmpegRemuxer {
    ffmpeg_path: String,
    timeout: Option<Duration>,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            timeout: timeout_from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ProcessingError> {
        let start = std::time::Instant::now();

        let args = [
            OsStr::new("-y"),
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-c"),
            OsStr::new("copy"),
            OsStr::new("-movflags"),
            OsStr::new("faststart"),
            OsStr::new("-f"),
            OsStr::new("mp4"),
            output.as_os_str(),
        ];
        tool::run(&self.ffmpeg_path, args, self.timeout)
            .await
            .map_err(|e| ProcessingError::RemuxFailure(e.to_string()))?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            "Fast-start remux completed"
        );

        Ok(())
    }
}

#[derive(Clone)]
pub struct FastStartNormalizer {
    remuxer: Arc<dyn Remuxer>,
    scratch: ScratchSpace,
}

impl FastStartNormalizer {
    pub fn new(remuxer: Arc<dyn Remuxer>, scratch: ScratchSpace) -> Self {
        Self { remuxer, scratch }
    }

    /// Remux `staged` into a new scratch file. The input is left untouched.
    pub async fn normalize(&self, staged: &ScratchFile) -> Result<ScratchFile, ProcessingError> {
        let output = self.scratch.reserve(".processing.mp4").map_err(|e| {
            ProcessingError::RemuxFailure(format!("Failed to allocate output file: {}", e))
        })?;

        self.remuxer.remux(staged.path(), output.path()).await?;

        let size = output
            .len()
            .await
            .map_err(|e| ProcessingError::RemuxFailure(e.to_string()))?;
        if size == 0 {
            return Err(ProcessingError::EmptyOutput(output.path().to_path_buf()));
        }

        Ok(output)
    }
}
