//! OAuth 1.0a request signing
//!
//! Builds the signature base string, computes the HMAC-SHA1 signature, and
//! assembles the `Authorization` header for signed token-exchange requests.
//! Encoding and ordering here are interop-critical: any deviation breaks
//! verification on the provider side.

use std::sync::Arc;

use chrono::Utc;
use rand::{thread_rng, Rng};
use wa_types::{AppResult, HmacSha1};

use super::params::ParameterSet;

/// Seed length fed to the hash when deriving a 40-hex-character nonce.
const NONCE_SEED_LEN: usize = 32;

/// Signature computed for one signed request.
///
/// Consumed immediately by the HTTP step; `signature` is the
/// percent-encoded Base64 HMAC-SHA1 digest as it appears in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResult {
    pub signature_base_string: String,
    pub authorization_header: String,
    pub signature: String,
}

/// Percent-encode per the OAuth 1.0a reserved-character profile.
///
/// Unreserved characters (`A-Za-z0-9-._~`) pass through unchanged;
/// everything else becomes `%XX`. This is stricter than
/// `encodeURIComponent`-style encoding, which also leaves `!*'()` alone.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Generate a random alphanumeric nonce of `length` characters.
pub fn create_nonce(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..=25 => (b'A' + idx) as char,
                26..=51 => (b'a' + (idx - 26)) as char,
                _ => (b'0' + (idx - 52)) as char,
            }
        })
        .collect()
}

/// OAuth 1.0a signer over an injected HMAC-SHA1 capability.
pub struct SignatureEngine {
    mac: Arc<dyn HmacSha1>,
}

impl SignatureEngine {
    pub fn new(mac: Arc<dyn HmacSha1>) -> Self {
        Self { mac }
    }

    /// Sign one request.
    ///
    /// Header and body parameters are merged for the base string; body
    /// values are percent-encoded before the merge, so after the whole
    /// parameter segment is encoded again they carry the standard double
    /// encoding. The caller's header set is not modified; the returned
    /// Authorization header renders the header parameters in insertion
    /// order with `oauth_signature` appended last.
    ///
    /// # Arguments
    /// * `method` - HTTP method; uppercased into the base string
    /// * `endpoint` - request URL without query string
    /// * `header_params` - `oauth_*` protocol parameters
    /// * `body_params` - request body parameters (signed, not rendered into
    ///   the header)
    /// * `consumer_secret` - client secret half of the signing key
    /// * `token_secret` - token secret half of the signing key, if any
    pub fn create_signature(
        &self,
        method: &str,
        endpoint: &str,
        header_params: &ParameterSet,
        body_params: &ParameterSet,
        consumer_secret: &str,
        token_secret: Option<&str>,
    ) -> AppResult<SignatureResult> {
        let mut merged = header_params.clone();
        for (key, value) in body_params.iter() {
            merged.insert(key, percent_encode(value));
        }

        // Parameter segment: ascending key order, then the joined string is
        // encoded as a unit so `=` and `&` appear as %3D and %26.
        let param_string = merged
            .sorted()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let signature_base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(endpoint),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(consumer_secret),
            percent_encode(token_secret.unwrap_or(""))
        );
        let digest = self.mac.hmac_sha1_base64(&signing_key, &signature_base_string)?;
        let signature = percent_encode(&digest);

        let mut header = header_params.clone();
        header.insert("oauth_signature", signature.clone());
        let authorization_header = format!(
            "OAuth {}",
            header
                .iter()
                .map(|(k, v)| format!("{k}=\"{v}\""))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(SignatureResult {
            signature_base_string,
            authorization_header,
            signature,
        })
    }

    /// Build the standard OAuth protocol parameter set for one request:
    /// consumer key, nonce, signature method, current Unix timestamp, and
    /// protocol version.
    ///
    /// The nonce is the SHA-1 hex digest of a fresh random seed, giving the
    /// conventional 40-hex-character shape without deriving it from the
    /// clock.
    pub fn oauth_parameters(&self, consumer_key: &str) -> AppResult<ParameterSet> {
        let nonce = self.mac.sha1_hex(&create_nonce(NONCE_SEED_LEN))?;
        let mut params = ParameterSet::new();
        params.insert("oauth_consumer_key", consumer_key);
        params.insert("oauth_nonce", nonce);
        params.insert("oauth_signature_method", "HMAC-SHA1");
        params.insert("oauth_timestamp", Utc::now().timestamp().to_string());
        params.insert("oauth_version", "1.0");
        Ok(params)
    }
}
