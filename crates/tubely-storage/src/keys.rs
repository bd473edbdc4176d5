//! Asset key generation.
//!
//! Every backend stores processed videos under keys produced here, so the key layout
//! stays identical regardless of where the bytes end up.

use base64::Engine;
use rand::RngCore;

/// Number of random bytes behind each asset id.
pub const ASSET_ID_BYTES: usize = 32;

/// Extension used when the content type is not of the form `type/subtype`.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// 256 bits from the thread-local CSPRNG, unpadded base64url (43 characters).
pub fn asset_id() -> String {
    let mut bytes = [0u8; ASSET_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// File extension for a content type: `video/mp4` gives `.mp4`.
///
/// MIME parameters are ignored and the result is lowercased. Anything that does not split
/// into exactly two non-empty `/`-separated parts maps to `.bin`.
pub fn extension_for(content_type: &str) -> String {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let parts: Vec<&str> = essence.split('/').collect();
    match parts.as_slice() {
        [kind, subtype] if !kind.is_empty() && !subtype.is_empty() => format!(".{}", subtype),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}

/// `<random-id><ext>`
pub fn asset_key(content_type: &str) -> String {
    format!("{}{}", asset_id(), extension_for(content_type))
}

/// `<prefix>/<random-id><ext>`
pub fn prefixed_asset_key(prefix: &str, content_type: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), asset_key(content_type))
}
