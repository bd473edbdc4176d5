//! Tubely HTTP API
//!
//! Axum application exposing the video ingestion pipeline: authenticated upload and
//! retrieval of video content, presigned read URLs, and asset serving for the local
//! filesystem backend.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
