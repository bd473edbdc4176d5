//! Defaults shared by configuration and the upload pipeline.

/// The only container type accepted by the upload endpoint unless overridden.
pub const DEFAULT_VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Upload ceiling: 1 GiB.
pub const DEFAULT_MAX_VIDEO_SIZE_BYTES: u64 = 1 << 30;

/// Multipart form field carrying the video bytes.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Lifetime of presigned read URLs handed to clients.
pub const DEFAULT_PRESIGNED_URL_TTL_SECS: u64 = 120;

/// Upper bound for a single ffprobe/ffmpeg invocation.
pub const DEFAULT_MEDIA_TOOL_TIMEOUT_SECS: u64 = 300;
