//! Signed image URLs.
//!
//! When a signing key is configured, image URLs carry an HMAC-SHA256
//! signature over the blob identifier and an expiry timestamp, so links can
//! be handed out without further authentication and stop working after the
//! validity window. Without a key the store falls back to plain public URLs.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Validity window for signed image URLs, in seconds (7 days).
pub const SIGNED_URL_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Signs and verifies time-bounded image URLs with HMAC-SHA256.
#[derive(Clone)]
pub struct UrlSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").finish_non_exhaustive()
    }
}

impl UrlSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    fn mac(&self, blob_id: &str, expires: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(blob_id.as_bytes());
        mac.update(b":");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    /// Hex signature over `blob_id` and a unix expiry timestamp.
    pub fn sign(&self, blob_id: &str, expires: i64) -> String {
        hex::encode(self.mac(blob_id, expires).finalize().into_bytes())
    }

    /// Query-string fragment (`expires=...&sig=...`) for a URL that is valid
    /// for [`SIGNED_URL_TTL_SECS`] from `now`.
    pub fn signed_query(&self, blob_id: &str, now: DateTime<Utc>) -> String {
        let expires = (now + Duration::seconds(SIGNED_URL_TTL_SECS)).timestamp();
        format!("expires={}&sig={}", expires, self.sign(blob_id, expires))
    }

    /// Check a signature and its expiry. Comparison is constant-time.
    pub fn verify(&self, blob_id: &str, expires: i64, sig: &str, now: DateTime<Utc>) -> bool {
        if expires < now.timestamp() {
            return false;
        }
        let Ok(sig_bytes) = hex::decode(sig) else {
            return false;
        };
        self.mac(blob_id, expires).verify_slice(&sig_bytes).is_ok()
    }
}
