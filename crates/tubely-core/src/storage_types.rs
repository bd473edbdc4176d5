use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// How the uploaded object is exposed through the video record's URL field.
///
/// - `Direct`: the store's own public URL for the key.
/// - `Cdn`: `https://{distribution}/{key}`.
/// - `Presigned`: a `bucket,key` reference; readers get a time-limited URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    #[default]
    Direct,
    Cdn,
    Presigned,
}

impl FromStr for DeliveryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(DeliveryMode::Direct),
            "cdn" => Ok(DeliveryMode::Cdn),
            "presigned" => Ok(DeliveryMode::Presigned),
            _ => Err(anyhow::anyhow!("Invalid video delivery mode: {}", s)),
        }
    }
}

impl Display for DeliveryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DeliveryMode::Direct => write!(f, "direct"),
            DeliveryMode::Cdn => write!(f, "cdn"),
            DeliveryMode::Presigned => write!(f, "presigned"),
        }
    }
}
