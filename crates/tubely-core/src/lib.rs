//! Tubely Core Library
//!
//! Domain models, error types and configuration shared by every Tubely crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::{AppConfig, BaseConfig, Config, VideoPipelineSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::{DeliveryMode, StorageBackend};
pub use models::{ObjectReference, Video, VideoResponse};
