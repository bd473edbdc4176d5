use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::ProcessingError;
use crate::video::{ProbeOutput, ProbeStream, Prober, Remuxer};

/// Prober returning a canned result.
pub struct FakeProber {
    result: Result<ProbeOutput, String>,
    calls: AtomicUsize,
}

impl FakeProber {
    pub fn with_output(output: ProbeOutput) -> Self {
        Self {
            result: Ok(output),
            calls: AtomicUsize::new(0),
        }
    }

    /// A single video stream with the given display aspect ratio.
    pub fn with_ratio(ratio: &str) -> Self {
        Self::with_output(ProbeOutput {
            streams: vec![ProbeStream {
                index: 0,
                codec_type: Some("video".to_string()),
                width: None,
                height: None,
                display_aspect_ratio: Some(ratio.to_string()),
            }],
        })
    }

    /// Streams without any display aspect ratio.
    pub fn without_ratio() -> Self {
        Self::with_output(ProbeOutput {
            streams: vec![ProbeStream {
                index: 0,
                codec_type: Some("audio".to_string()),
                ..Default::default()
            }],
        })
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, _path: &Path) -> Result<ProbeOutput, ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(ProcessingError::ProbeFailure)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemuxBehavior {
    /// Copy input to output unchanged.
    Copy,
    /// Succeed but leave the output empty.
    Empty,
    /// Fail as if ffmpeg exited non-zero.
    Fail,
}

pub struct FakeRemuxer {
    behavior: RemuxBehavior,
    calls: AtomicUsize,
}

impl FakeRemuxer {
    pub fn new(behavior: RemuxBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Remuxer for FakeRemuxer {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), ProcessingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            RemuxBehavior::Copy => {
                tokio::fs::copy(input, output)
                    .await
                    .map_err(|e| ProcessingError::RemuxFailure(e.to_string()))?;
                Ok(())
            }
            RemuxBehavior::Empty => {
                tokio::fs::write(output, b"")
                    .await
                    .map_err(|e| ProcessingError::RemuxFailure(e.to_string()))?;
                Ok(())
            }
            RemuxBehavior::Fail => Err(ProcessingError::RemuxFailure(
                "ffmpeg exited with exit status: 1: moov atom not found".to_string(),
            )),
        }
    }
}
