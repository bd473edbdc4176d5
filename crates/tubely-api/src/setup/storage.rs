//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, StorageBackend};
use tubely_storage::{AssetUrlSigner, Storage};

/// Build the configured storage backend. The local backend also yields the signer used by
/// the `/assets` route to check signed URLs.
pub async fn setup_storage(
    config: &Config,
) -> Result<(Arc<dyn Storage>, Option<AssetUrlSigner>)> {
    let storage = tubely_storage::create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    let asset_signer = match config.storage_backend() {
        StorageBackend::Local => Some(AssetUrlSigner::new(config.asset_signing_secret())),
        StorageBackend::S3 => None,
    };

    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %storage.bucket(),
        "Storage backend initialized"
    );

    Ok((storage, asset_signer))
}
