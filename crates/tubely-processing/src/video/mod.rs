//! Video inspection and normalization backed by FFmpeg tooling.

mod aspect;
mod faststart;
mod probe;
mod tool;

pub use aspect::AspectClass;
pub use faststart::{FastStartNormalizer, FfmpegRemuxer, Remuxer};
pub use probe::{FfprobeProber, MediaInspector, ProbeOutput, ProbeStream, Prober};
