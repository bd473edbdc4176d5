//! Error types module
//!
//! `AppError` is the single user-facing error taxonomy for Tubely. Crate-local errors
//! (storage, processing, upload pipeline) are converted into it at the HTTP boundary so
//! every failure gets a stable status code, machine-readable code and client message.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "REMUX_FAILURE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Malformed object reference: {0}")]
    MalformedReference(String),

    #[error("Staging failed: {0}")]
    Staging(String),

    #[error("Probe failed: {0}")]
    ProbeFailure(String),

    #[error("No stream reports a display aspect ratio: {0}")]
    NoAspectRatio(String),

    #[error("Remux failed: {0}")]
    RemuxFailure(String),

    #[error("Remux produced an empty file: {0}")]
    EmptyOutput(String),

    #[error("Record update failed after storing object {key}: {message}")]
    RecordUpdate { key: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            502,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Check the bearer token"),
            false,
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (
            403,
            "FORBIDDEN",
            false,
            Some("Only the owner of a video can change it"),
            false,
            LogLevel::Debug,
        ),
        AppError::MalformedReference(_) => (
            400,
            "MALFORMED_REFERENCE",
            false,
            Some("Object references must have the form 'bucket,key'"),
            false,
            LogLevel::Warn,
        ),
        AppError::Staging(_) => (
            500,
            "STAGING_ERROR",
            true,
            Some("Retry the upload"),
            true,
            LogLevel::Error,
        ),
        AppError::ProbeFailure(_) => (
            500,
            "PROBE_FAILURE",
            false,
            Some("Check that the file is a valid MP4 video"),
            true,
            LogLevel::Error,
        ),
        AppError::NoAspectRatio(_) => (
            500,
            "NO_ASPECT_RATIO",
            false,
            Some("Upload a file that contains a video stream"),
            true,
            LogLevel::Warn,
        ),
        AppError::RemuxFailure(_) => (
            500,
            "REMUX_FAILURE",
            false,
            Some("Check that the file is a valid MP4 video"),
            true,
            LogLevel::Error,
        ),
        AppError::EmptyOutput(_) => (
            500,
            "EMPTY_OUTPUT",
            false,
            Some("Check that the file is a valid MP4 video"),
            true,
            LogLevel::Error,
        ),
        AppError::RecordUpdate { .. } => (
            500,
            "RECORD_UPDATE_ERROR",
            true,
            Some("Retry the upload"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::MalformedReference(_) => "MalformedReference",
            AppError::Staging(_) => "Staging",
            AppError::ProbeFailure(_) => "ProbeFailure",
            AppError::NoAspectRatio(_) => "NoAspectRatio",
            AppError::RemuxFailure(_) => "RemuxFailure",
            AppError::EmptyOutput(_) => "EmptyOutput",
            AppError::RecordUpdate { .. } => "RecordUpdate",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to store video".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::MalformedReference(_) => "Stored video reference is malformed".to_string(),
            AppError::Staging(_) => "Failed to receive video upload".to_string(),
            AppError::ProbeFailure(_) => "Could not read video metadata".to_string(),
            AppError::NoAspectRatio(_) => "Could not determine video aspect ratio".to_string(),
            AppError::RemuxFailure(_) => "Could not prepare video for streaming".to_string(),
            AppError::EmptyOutput(_) => "Could not prepare video for streaming".to_string(),
            AppError::RecordUpdate { .. } => "Failed to update video record".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_auth_errors_are_distinct() {
        let unauthorized = AppError::Unauthorized("Missing authorization header".to_string());
        let forbidden = AppError::Forbidden("Video is owned by another user".to_string());
        assert_eq!(unauthorized.http_status_code(), 401);
        assert_eq!(forbidden.http_status_code(), 403);
        assert_eq!(forbidden.error_code(), "FORBIDDEN");
        assert!(!forbidden.is_sensitive());
        assert_eq!(forbidden.client_message(), "Video is owned by another user");
    }

    #[test]
    fn test_processing_failures_hide_tool_output() {
        let err = AppError::RemuxFailure("ffmpeg exited with 1: moov atom not found".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert!(!err.client_message().contains("moov"));

        let empty = AppError::EmptyOutput("/tmp/x.mp4".to_string());
        assert_eq!(empty.error_code(), "EMPTY_OUTPUT");
        assert_ne!(empty.error_code(), err.error_code());
    }

    #[test]
    fn test_record_update_mentions_orphaned_key_internally() {
        let err = AppError::RecordUpdate {
            key: "landscape/abc.mp4".to_string(),
            message: "pool closed".to_string(),
        };
        assert!(err.to_string().contains("landscape/abc.mp4"));
        assert_eq!(err.client_message(), "Failed to update video record");
        assert_eq!(err.error_code(), "RECORD_UPDATE_ERROR");
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = AppError::NotFound("test".to_string());
        assert_eq!(err.suggested_action(), Some("Verify the resource ID exists"));

        let err = AppError::InvalidInput("test".to_string());
        assert_eq!(
            err.suggested_action(),
            Some("Check request parameters and try again")
        );

        let err = AppError::PayloadTooLarge("too big".to_string());
        assert_eq!(err.http_status_code(), 413);
    }
}
