use std::sync::Arc;

use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::UploadOrchestrator;
use tubely_storage::{AssetUrlSigner, Storage};

use crate::auth::JwtService;
use crate::services::PresignedAccessIssuer;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub orchestrator: UploadOrchestrator,
    pub presigner: PresignedAccessIssuer,
    pub jwt: Arc<JwtService>,
    /// Present only for the local filesystem backend, which serves `/assets` itself.
    pub asset_signer: Option<AssetUrlSigner>,
}
