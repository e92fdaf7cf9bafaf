//! Cryptographic utilities
//!
//! `ring`-backed implementation of the HMAC-SHA1 capability used for
//! OAuth 1.0a request signing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::{digest, hmac};
use wa_types::HmacSha1;

/// HMAC-SHA1 provider backed by `ring`.
///
/// SHA-1 is a legacy algorithm; `ring` names the constants accordingly.
/// The OAuth 1.0a wire protocol pins HMAC-SHA1, so there is no stronger
/// digest to swap in without breaking interop with provider verifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingHmacSha1;

impl HmacSha1 for RingHmacSha1 {
    fn hmac_sha1_base64(&self, key: &str, message: &str) -> anyhow::Result<String> {
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
        let tag = hmac::sign(&key, message.as_bytes());
        Ok(STANDARD.encode(tag.as_ref()))
    }

    fn sha1_hex(&self, input: &str) -> anyhow::Result<String> {
        let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, input.as_bytes());
        Ok(hex::encode(digest.as_ref()))
    }
}
