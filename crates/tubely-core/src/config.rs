//! Configuration module
//!
//! Configuration is read once from the environment (a `.env` file is honoured) and then
//! passed explicitly to every component that needs it. Nothing below the setup layer reads
//! process environment on its own.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MAX_VIDEO_SIZE_BYTES, DEFAULT_MEDIA_TOOL_TIMEOUT_SECS,
    DEFAULT_PRESIGNED_URL_TTL_SECS, DEFAULT_VIDEO_CONTENT_TYPE,
};
use crate::storage_types::{DeliveryMode, StorageBackend};

const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Server, auth and database settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub log_format: String,
    pub http_concurrency_limit: usize,
}

/// Settings consumed by the video ingestion pipeline
#[derive(Clone, Debug)]
pub struct VideoPipelineSettings {
    pub max_video_size_bytes: u64,
    pub video_content_type: String,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// 0 disables the timeout
    pub media_tool_timeout_secs: u64,
    pub scratch_dir: Option<PathBuf>,
    pub delivery: DeliveryMode,
    pub presigned_url_ttl_secs: u64,
}

/// Full application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub aws_region: Option<String>,
    pub cdn_distribution: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub asset_signing_secret: String,
    pub pipeline: VideoPipelineSettings,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn inner(&self) -> &AppConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().base.database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.inner().aws_region.as_deref()
    }

    pub fn cdn_distribution(&self) -> Option<&str> {
        self.inner().cdn_distribution.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn asset_signing_secret(&self) -> &str {
        &self.inner().asset_signing_secret
    }

    pub fn pipeline(&self) -> &VideoPipelineSettings {
        &self.inner().pipeline
    }

    pub fn max_video_size_bytes(&self) -> u64 {
        self.inner().pipeline.max_video_size_bytes
    }

    pub fn delivery(&self) -> DeliveryMode {
        self.inner().pipeline.delivery
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    parse_setting(name, optional_var(name), default)
}

/// Parse a set value; an unset one falls back to `default`, a malformed one is an error.
fn parse_setting<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?;

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            jwt_secret: jwt_secret.clone(),
            database_url: optional_var("DATABASE_URL"),
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parsed_var("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
            http_concurrency_limit: parsed_var("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?
                .max(1),
        };

        let storage_backend = match optional_var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let delivery = match optional_var("VIDEO_DELIVERY") {
            Some(value) => value.parse()?,
            None => DeliveryMode::Direct,
        };

        let pipeline = VideoPipelineSettings {
            max_video_size_bytes: parsed_var(
                "MAX_VIDEO_SIZE_BYTES",
                DEFAULT_MAX_VIDEO_SIZE_BYTES,
            )?,
            video_content_type: optional_var("VIDEO_CONTENT_TYPE")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| DEFAULT_VIDEO_CONTENT_TYPE.to_string()),
            ffmpeg_path: optional_var("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: optional_var("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            media_tool_timeout_secs: parsed_var(
                "MEDIA_TOOL_TIMEOUT_SECS",
                DEFAULT_MEDIA_TOOL_TIMEOUT_SECS,
            )?,
            scratch_dir: optional_var("SCRATCH_DIR").map(PathBuf::from),
            delivery,
            presigned_url_ttl_secs: parsed_var(
                "PRESIGNED_URL_TTL_SECS",
                DEFAULT_PRESIGNED_URL_TTL_SECS,
            )?,
        };

        Ok(AppConfig {
            base,
            storage_backend,
            s3_bucket: optional_var("S3_BUCKET"),
            s3_region: optional_var("S3_REGION"),
            s3_endpoint: optional_var("S3_ENDPOINT"),
            aws_region: optional_var("AWS_REGION"),
            cdn_distribution: optional_var("CDN_DISTRIBUTION"),
            local_storage_path: optional_var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: optional_var("LOCAL_STORAGE_BASE_URL"),
            asset_signing_secret: optional_var("ASSET_SIGNING_SECRET").unwrap_or(jwt_secret),
            pipeline,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        match self.base.database_url.as_deref() {
            Some(url) if !url.starts_with("postgres://") && !url.starts_with("postgresql://") => {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
            None if is_production_name(&self.base.environment) => {
                return Err(anyhow::anyhow!("DATABASE_URL must be set in production"));
            }
            _ => {}
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.pipeline.delivery == DeliveryMode::Cdn && self.cdn_distribution.is_none() {
            return Err(anyhow::anyhow!(
                "CDN_DISTRIBUTION must be set when VIDEO_DELIVERY=cdn"
            ));
        }

        if self.pipeline.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_BYTES must be greater than 0"));
        }

        let content_type = &self.pipeline.video_content_type;
        if content_type.split('/').filter(|p| !p.is_empty()).count() != 2 {
            return Err(anyhow::anyhow!(
                "VIDEO_CONTENT_TYPE must look like 'type/subtype', got '{}'",
                content_type
            ));
        }

        if self.pipeline.presigned_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!(
                "PRESIGNED_URL_TTL_SECS must be greater than 0"
            ));
        }

        Ok(())
    }
}
