//! Shared flow types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::params::ParameterSet;

/// Unique identifier for one flow attempt, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(Uuid);

impl FlowId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-invocation flow options.
#[derive(Debug, Clone, Default)]
pub struct FlowOptions {
    /// Override the provider's default redirect URI.
    pub redirect_uri: Option<String>,
    /// Bound the wait for the redirect; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Tokens returned by a completed authorization flow.
///
/// The keys are provider-specific: implicit flows carry `access_token`
/// (plus `expires_in`/`email` when the provider sends them); three-legged
/// flows carry the full access-token response (`oauth_token`,
/// `oauth_token_secret`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    params: ParameterSet,
}

impl TokenGrant {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get("access_token")
    }

    pub fn expires_in(&self) -> Option<&str> {
        self.get("expires_in")
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email")
    }

    pub fn oauth_token(&self) -> Option<&str> {
        self.get("oauth_token")
    }

    pub fn oauth_token_secret(&self) -> Option<&str> {
        self.get("oauth_token_secret")
    }

    pub fn into_params(self) -> ParameterSet {
        self.params
    }
}

impl From<ParameterSet> for TokenGrant {
    fn from(params: ParameterSet) -> Self {
        Self { params }
    }
}
