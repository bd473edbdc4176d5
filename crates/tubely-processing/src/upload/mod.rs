//! Upload pipeline: validate → stage → normalize → probe → key → store → record.

mod error;
mod pipeline;
mod strategy;

pub use error::UploadError;
pub use pipeline::{UploadOrchestrator, UploadPipelineConfig, UploadRequest, UploadStage};
pub use strategy::{
    strategy_for, CdnUrlStrategy, DirectUrlStrategy, KeyUrlStrategy, ObjectReferenceStrategy,
};
