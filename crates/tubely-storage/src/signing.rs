//! HMAC-signed asset URLs for the local filesystem backend.
//!
//! A signed URL is `<base>/<key>?expires=<unix-seconds>&signature=<sig>` where
//! `sig = base64url(HMAC-SHA256(secret, "<key>\n<expires>"))`.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{StorageError, StorageResult};

type HmacSha256 = Hmac<Sha256>;

/// Why a signed asset request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureRejection {
    Expired,
    Invalid,
}

#[derive(Clone)]
pub struct AssetUrlSigner {
    secret: Vec<u8>,
}

impl AssetUrlSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        AssetUrlSigner {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self, key: &str, expires: u64) -> StorageResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }

    /// Signature for `key` valid until `expires` (unix seconds).
    pub fn signature(&self, key: &str, expires: u64) -> StorageResult<String> {
        let tag = self.mac(key, expires)?.finalize().into_bytes();
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(tag))
    }

    /// Build a signed URL for `key` under `base_url`, valid for `expires_in`.
    pub fn signed_url(
        &self,
        base_url: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let expires = unix_now().saturating_add(expires_in.as_secs());
        let signature = self.signature(key, expires)?;
        Ok(format!(
            "{}/{}?expires={}&signature={}",
            base_url.trim_end_matches('/'),
            key,
            expires,
            urlencoding::encode(&signature)
        ))
    }

    /// Check a signature presented for `key`. The comparison is constant-time.
    pub fn verify(&self, key: &str, expires: u64, signature: &str) -> Result<(), SignatureRejection> {
        if unix_now() > expires {
            return Err(SignatureRejection::Expired);
        }
        let tag = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SignatureRejection::Invalid)?;
        let mac = self
            .mac(key, expires)
            .map_err(|_| SignatureRejection::Invalid)?;
        mac.verify_slice(&tag)
            .map_err(|_| SignatureRejection::Invalid)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
