//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        delivery = %config.delivery(),
        "Configuration loaded and validated successfully"
    );

    let repository = database::setup_database(&config).await?;
    let (storage, asset_signer) = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, repository, storage, asset_signer)?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
