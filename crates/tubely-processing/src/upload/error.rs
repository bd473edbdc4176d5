use thiserror::Error;
use tubely_core::AppError;
use tubely_storage::StorageError;
use uuid::Uuid;

use crate::error::ProcessingError;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Video {0} not found")]
    VideoNotFound(Uuid),

    #[error("User {user_id} does not own video {video_id}")]
    NotOwner { video_id: Uuid, user_id: Uuid },

    #[error("Unsupported content type '{actual}', expected '{expected}'")]
    UnsupportedContentType { actual: String, expected: String },

    #[error("Failed to load video {video_id}")]
    Lookup {
        video_id: Uuid,
        #[source]
        source: AppError,
    },

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("Failed to store object {key}")]
    Store {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to update video {video_id} after storing object {key}")]
    RecordUpdate {
        video_id: Uuid,
        key: String,
        #[source]
        source: AppError,
    },
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::VideoNotFound(video_id) => {
                AppError::NotFound(format!("Video {} not found", video_id))
            }
            UploadError::NotOwner { .. } => {
                AppError::Forbidden("Only the owner of a video can upload its content".to_string())
            }
            UploadError::UnsupportedContentType { expected, .. } => {
                AppError::InvalidInput(format!("Invalid file type, only {} is allowed", expected))
            }
            UploadError::Lookup { source, .. } => source,
            UploadError::Processing(e) => e.into(),
            UploadError::Store { key, source } => {
                AppError::Storage(format!("Failed to store object {}: {}", key, source))
            }
            UploadError::RecordUpdate { key, source, .. } => AppError::RecordUpdate {
                key,
                message: source.to_string(),
            },
        }
    }
}
