//! Tubely Storage Library
//!
//! Storage abstraction and backends (S3 via `object_store`, local filesystem) for
//! processed videos, plus the asset key generator.
//!
//! # Storage key format
//!
//! Keys are `<prefix>/<random-id><ext>` where the prefix is the aspect class
//! (`landscape`, `portrait`, `other`), the random id is 256 bits of CSPRNG output
//! encoded as unpadded base64url, and the extension is derived from the content type.
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod signing;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use signing::AssetUrlSigner;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
pub use tubely_core::{ObjectReference, StorageBackend};
