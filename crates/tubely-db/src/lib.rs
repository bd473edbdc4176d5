//! Tubely persistence layer
//!
//! The video metadata store behind a [`VideoRepository`] trait, with a PostgreSQL
//! implementation for deployments and an in-memory one for development and tests.

pub mod db;

pub use db::{MemoryVideoRepository, PgVideoRepository, VideoRepository};
