//! Cryptographic capability traits
//!
//! OAuth 1.0a request signing needs an HMAC-SHA1 primitive. Rather than
//! reaching for an ambient implementation, the signing code takes the
//! capability as an explicit dependency so a missing or broken provider
//! surfaces as a structured error at the call site.

/// HMAC-SHA1 and SHA-1 digest capability used for request signing.
///
/// `wa-utils` ships a `ring`-backed implementation; tests substitute
/// recording fakes.
pub trait HmacSha1: Send + Sync {
    /// Base64-encoded HMAC-SHA1 of `message` keyed with `key`.
    fn hmac_sha1_base64(&self, key: &str, message: &str) -> anyhow::Result<String>;

    /// Lowercase hex SHA-1 digest of `input`.
    fn sha1_hex(&self, input: &str) -> anyhow::Result<String>;
}
