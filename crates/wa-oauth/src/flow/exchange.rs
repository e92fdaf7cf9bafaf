//! Token-exchange HTTP transport
//!
//! The token endpoints speak `application/x-www-form-urlencoded` over POST
//! and answer with `&`-joined text bodies. The trait keeps the flows off
//! the network in tests.

use async_trait::async_trait;
use tracing::{debug, error};
use wa_types::{AppError, AppResult};

/// POST transport used for token-exchange requests.
#[async_trait]
pub trait HttpExchanger: Send + Sync {
    /// POST `body` to `url` with the given headers, returning the raw
    /// response text.
    async fn post_form(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> AppResult<String>;
}

/// `reqwest`-backed exchanger.
pub struct ReqwestExchanger {
    client: reqwest::Client,
}

impl ReqwestExchanger {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpExchanger for ReqwestExchanger {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> AppResult<String> {
        debug!("POST {}", url);

        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("Token request to {} failed with status {}", url, status);
            return Err(AppError::Transport(format!(
                "Request failed with status {}: {}",
                status, text
            )));
        }

        Ok(text)
    }
}
