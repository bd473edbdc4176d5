//! HTTP-layer constants

/// Multipart framing allowance added on top of the video size ceiling for the request
/// body limit, so the pipeline's own byte count decides oversize uploads.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Lifetime of bearer tokens minted by [`crate::auth::JwtService::issue`].
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

pub const API_PREFIX: &str = "/api";

pub const ASSETS_PREFIX: &str = "/assets";
