//! Tubely video processing
//!
//! The ingestion pipeline that turns an uploaded byte stream into a stored, fast-start MP4
//! referenced from its video record: staging to scratch files, stream-copy remuxing with
//! FFmpeg, aspect-ratio probing with ffprobe, and the upload orchestrator tying these
//! together with storage and the video repository.

pub mod error;
pub mod scratch;
pub mod upload;
pub mod video;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::ProcessingError;
pub use scratch::{ScratchFile, ScratchSpace};
pub use upload::{
    strategy_for, CdnUrlStrategy, DirectUrlStrategy, KeyUrlStrategy, ObjectReferenceStrategy,
    UploadError, UploadOrchestrator, UploadPipelineConfig, UploadRequest, UploadStage,
};
pub use video::{
    AspectClass, FastStartNormalizer, FfmpegRemuxer, FfprobeProber, MediaInspector, ProbeOutput,
    ProbeStream, Prober, Remuxer,
};
