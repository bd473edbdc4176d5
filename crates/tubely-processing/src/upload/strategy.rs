//! How an uploaded object's key is derived and which URL is recorded for it.

use std::sync::Arc;

use tubely_core::DeliveryMode;
use tubely_storage::{keys, Storage};

use crate::video::AspectClass;

/// Key derivation and access-URL policy for stored videos.
pub trait KeyUrlStrategy: Send + Sync {
    /// Storage key for a video of the given aspect class and content type.
    fn key_for(&self, class: AspectClass, content_type: &str) -> String {
        keys::prefixed_asset_key(class.prefix(), content_type)
    }

    /// Value recorded in the video's `video_url` field for `key`.
    fn access_url(&self, key: &str) -> String;
}

/// Records the store's own public URL.
pub struct DirectUrlStrategy {
    storage: Arc<dyn Storage>,
}

impl DirectUrlStrategy {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl KeyUrlStrategy for DirectUrlStrategy {
    fn access_url(&self, key: &str) -> String {
        self.storage.public_url(key)
    }
}

/// Records `https://<distribution>/<key>`.
pub struct CdnUrlStrategy {
    distribution: String,
}

impl CdnUrlStrategy {
    pub fn new(distribution: impl Into<String>) -> Self {
        let distribution = distribution.into();
        let distribution = distribution
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        Self { distribution }
    }
}

impl KeyUrlStrategy for CdnUrlStrategy {
    fn access_url(&self, key: &str) -> String {
        format!("https://{}/{}", self.distribution, key)
    }
}

/// Records a `bucket,key` token; readers resolve it to a presigned URL.
pub struct ObjectReferenceStrategy {
    storage: Arc<dyn Storage>,
}

impl ObjectReferenceStrategy {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl KeyUrlStrategy for ObjectReferenceStrategy {
    fn access_url(&self, key: &str) -> String {
        self.storage.reference(key).to_token()
    }
}

/// Build the strategy for a delivery mode.
pub fn strategy_for(
    mode: DeliveryMode,
    storage: Arc<dyn Storage>,
    cdn_distribution: Option<&str>,
) -> anyhow::Result<Arc<dyn KeyUrlStrategy>> {
    let strategy: Arc<dyn KeyUrlStrategy> = match mode {
        DeliveryMode::Direct => Arc::new(DirectUrlStrategy::new(storage)),
        DeliveryMode::Cdn => {
            let distribution = cdn_distribution.ok_or_else(|| {
                anyhow::anyhow!("CDN_DISTRIBUTION must be set when VIDEO_DELIVERY=cdn")
            })?;
            Arc::new(CdnUrlStrategy::new(distribution))
        }
        DeliveryMode::Presigned => Arc::new(ObjectReferenceStrategy::new(storage)),
    };
    Ok(strategy)
}
