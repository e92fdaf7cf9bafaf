//! Provider endpoint presets
//!
//! The flows are provider-agnostic; these descriptors carry the endpoint
//! URLs and defaults for the providers shipped out of the box.

use serde::{Deserialize, Serialize};

/// Endpoints for an implicit-grant provider (token in the redirect
/// fragment, no request signing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitProvider {
    /// Provider name used in logs.
    pub name: String,
    /// Authorization page the surface is opened at.
    pub authorize_endpoint: String,
    /// Default redirect target watched for the token fragment.
    pub redirect_uri: String,
    /// Optional `display` hint appended to the authorization URL.
    pub display: Option<String>,
}

/// Endpoints for an OAuth 1.0a three-legged provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedProvider {
    /// Provider name used in logs.
    pub name: String,
    /// Signed POST target for obtaining a request token.
    pub request_token_endpoint: String,
    /// Authorization page the surface is opened at with the request token.
    pub authenticate_endpoint: String,
    /// Signed POST target for exchanging the verifier for an access token.
    pub access_token_endpoint: String,
    /// Default redirect target watched for the verifier callback.
    pub redirect_uri: String,
}

/// VKontakte implicit-grant preset.
pub fn vkontakte() -> ImplicitProvider {
    ImplicitProvider {
        name: "vkontakte".to_string(),
        authorize_endpoint: "https://oauth.vk.com/authorize".to_string(),
        redirect_uri: "http://oauth.vk.com/blank.html".to_string(),
        display: Some("touch".to_string()),
    }
}

/// Twitter three-legged preset.
pub fn twitter() -> SignedProvider {
    SignedProvider {
        name: "twitter".to_string(),
        request_token_endpoint: "https://api.twitter.com/oauth/request_token".to_string(),
        authenticate_endpoint: "https://api.twitter.com/oauth/authenticate".to_string(),
        access_token_endpoint: "https://api.twitter.com/oauth/access_token".to_string(),
        redirect_uri: "http://localhost/callback".to_string(),
    }
}
