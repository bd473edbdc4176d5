use std::path::PathBuf;

use thiserror::Error;
use tubely_core::AppError;

/// Failures raised while staging, remuxing or probing a video.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to stage upload: {0}")]
    Staging(String),

    #[error("Upload exceeds the maximum size of {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("ffprobe failed: {0}")]
    ProbeFailure(String),

    #[error("No stream in {0} reports a display aspect ratio")]
    NoAspectRatio(PathBuf),

    #[error("ffmpeg failed: {0}")]
    RemuxFailure(String),

    #[error("Remux produced an empty file at {0}")]
    EmptyOutput(PathBuf),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        let message = err.to_string();
        match err {
            ProcessingError::Staging(_) => AppError::Staging(message),
            ProcessingError::PayloadTooLarge { limit } => AppError::PayloadTooLarge(format!(
                "Video exceeds the maximum upload size of {} bytes",
                limit
            )),
            ProcessingError::ProbeFailure(_) => AppError::ProbeFailure(message),
            ProcessingError::NoAspectRatio(_) => AppError::NoAspectRatio(message),
            ProcessingError::RemuxFailure(_) => AppError::RemuxFailure(message),
            ProcessingError::EmptyOutput(_) => AppError::EmptyOutput(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::ErrorMetadata;

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err: AppError = ProcessingError::PayloadTooLarge { limit: 1024 }.into();
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("1024"));
    }

    #[test]
    fn test_empty_output_and_remux_failure_are_distinct() {
        let empty: AppError = ProcessingError::EmptyOutput(PathBuf::from("/tmp/out.mp4")).into();
        let remux: AppError = ProcessingError::RemuxFailure("exit status 1".to_string()).into();
        assert_eq!(empty.error_code(), "EMPTY_OUTPUT");
        assert_eq!(remux.error_code(), "REMUX_FAILURE");
    }
}
