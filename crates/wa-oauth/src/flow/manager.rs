//! OAuth flow manager - orchestrates browser-driven authorization flows

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use wa_types::{AppError, AppResult, HmacSha1};
use wa_utils::RingHmacSha1;

use crate::providers::{ImplicitProvider, SignedProvider};

use super::exchange::HttpExchanger;
use super::interceptor::{ParameterSource, RedirectInterceptor, Settlement};
use super::params::ParameterSet;
use super::signature::{percent_encode, SignatureEngine};
use super::surface::{BrowserSurface, SurfaceOptions, SurfaceSession};
use super::types::{FlowId, FlowOptions, TokenGrant};

/// Grace delay before closing the surface after the access-token exchange,
/// letting any final navigation settle.
const CLOSE_GRACE_MS: u64 = 10;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// OAuth flow manager
///
/// Orchestrates implicit-grant and three-legged signed flows over an
/// injected browser surface and HTTP transport. Each invocation owns its
/// surface and settles exactly once; concurrent invocations are
/// independent.
pub struct OauthFlowManager {
    /// Browser surface the flows drive.
    surface: Arc<dyn BrowserSurface>,

    /// Transport for the signed flow's token exchanges.
    http: Arc<dyn HttpExchanger>,

    /// HMAC-SHA1 capability; required by the signed flow.
    hmac: Option<Arc<dyn HmacSha1>>,
}

impl OauthFlowManager {
    /// Create a flow manager without a signing capability. The implicit
    /// flow works as-is; the signed flow rejects until one is supplied.
    pub fn new(surface: Arc<dyn BrowserSurface>, http: Arc<dyn HttpExchanger>) -> Self {
        Self {
            surface,
            http,
            hmac: None,
        }
    }

    /// Supply the HMAC-SHA1 capability used for request signing.
    pub fn with_hmac(mut self, hmac: Arc<dyn HmacSha1>) -> Self {
        self.hmac = Some(hmac);
        self
    }

    /// Wire the built-in `ring`-backed HMAC-SHA1 implementation.
    pub fn with_system_hmac(self) -> Self {
        self.with_hmac(Arc::new(RingHmacSha1))
    }

    /// Sign into VKontakte.
    ///
    /// # Arguments
    /// * `client_id` - application client id
    /// * `scopes` - requested permissions, e.g. `["friends", "wall"]`
    pub async fn vkontakte(&self, client_id: &str, scopes: &[String]) -> AppResult<TokenGrant> {
        self.implicit_flow(
            &crate::providers::vkontakte(),
            client_id,
            scopes,
            FlowOptions::default(),
        )
        .await
    }

    /// Sign into Twitter.
    ///
    /// # Arguments
    /// * `client_id` - OAuth consumer key
    /// * `client_secret` - OAuth consumer secret
    /// * `options` - redirect override and timeout
    pub async fn twitter(
        &self,
        client_id: &str,
        client_secret: &str,
        options: FlowOptions,
    ) -> AppResult<TokenGrant> {
        self.signed_flow(&crate::providers::twitter(), client_id, client_secret, options)
            .await
    }

    /// Run an implicit-grant flow: open the authorization page and recover
    /// the token from the redirect fragment.
    pub async fn implicit_flow(
        &self,
        provider: &ImplicitProvider,
        client_id: &str,
        scopes: &[String],
        options: FlowOptions,
    ) -> AppResult<TokenGrant> {
        let flow_id = FlowId::new();
        let redirect = options
            .redirect_uri
            .clone()
            .unwrap_or_else(|| provider.redirect_uri.clone());

        info!(
            "Starting implicit flow {} for provider {}",
            flow_id, provider.name
        );

        let auth_url = build_authorize_url(provider, client_id, scopes, &redirect);
        debug!("Flow {} opening {}", flow_id, auth_url);

        let mut session = self.surface.open(&auth_url, &SurfaceOptions::default()).await?;
        let mut interceptor =
            RedirectInterceptor::new(&redirect, ParameterSource::Fragment).require("access_token");

        let settlement = await_settlement(&mut session, &mut interceptor, options.timeout).await;
        session.close();

        match settlement? {
            Settlement::Matched(params) => {
                let mut grant = ParameterSet::new();
                for key in ["access_token", "expires_in", "email"] {
                    if let Some(value) = params.get(key) {
                        grant.insert(key, value);
                    }
                }
                info!("Implicit flow {} completed", flow_id);
                Ok(TokenGrant::from(grant))
            }
            Settlement::MissingParameter(_) => {
                warn!("Flow {} redirect carried no access token", flow_id);
                Err(AppError::Protocol("Problem authenticating".to_string()))
            }
            Settlement::Canceled => {
                warn!("Flow {} canceled by the user", flow_id);
                Err(AppError::Canceled)
            }
        }
    }

    /// Run a three-legged signed flow: signed request-token exchange, user
    /// authorization in the surface, signed access-token exchange.
    pub async fn signed_flow(
        &self,
        provider: &SignedProvider,
        client_id: &str,
        client_secret: &str,
        options: FlowOptions,
    ) -> AppResult<TokenGrant> {
        let flow_id = FlowId::new();

        // Hard dependency; checked before any network I/O.
        let mac = self.hmac.clone().ok_or_else(|| {
            AppError::MissingDependency("HMAC-SHA1 capability is not configured".to_string())
        })?;
        let engine = SignatureEngine::new(mac);

        let redirect = options
            .redirect_uri
            .clone()
            .unwrap_or_else(|| provider.redirect_uri.clone());

        info!(
            "Starting signed flow {} for provider {}",
            flow_id, provider.name
        );

        // Leg 1: request token.
        let oauth_params = engine.oauth_parameters(client_id)?;
        let mut callback_params = ParameterSet::new();
        callback_params.insert("oauth_callback", redirect.as_str());
        let signed = engine.create_signature(
            "POST",
            &provider.request_token_endpoint,
            &oauth_params,
            &callback_params,
            client_secret,
            None,
        )?;

        let response = self
            .http
            .post_form(
                &provider.request_token_endpoint,
                &[
                    ("Authorization".to_string(), signed.authorization_header),
                    ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
                ],
                format!("oauth_callback={}", percent_encode(&redirect)),
            )
            .await?;

        let request_token = ParameterSet::parse(&response)
            .remove("oauth_token")
            .ok_or_else(|| {
                AppError::Protocol("Oauth request token was not received".to_string())
            })?;
        debug!("Flow {} obtained request token", flow_id);

        // Leg 2: user authorization in the surface.
        let auth_url = format!(
            "{}?oauth_token={}",
            provider.authenticate_endpoint, request_token
        );
        let mut session = self.surface.open(&auth_url, &SurfaceOptions::default()).await?;
        let mut interceptor =
            RedirectInterceptor::new(&redirect, ParameterSource::Query).require("oauth_verifier");

        let settlement = match await_settlement(&mut session, &mut interceptor, options.timeout)
            .await
        {
            Ok(settlement) => settlement,
            Err(err) => {
                session.close();
                return Err(err);
            }
        };
        let callback = match settlement {
            Settlement::Matched(params) => params,
            Settlement::MissingParameter(_) => {
                session.close();
                warn!("Flow {} callback carried no oauth_verifier", flow_id);
                return Err(AppError::Protocol(
                    "Browser authentication failed to complete. No oauth_verifier was returned"
                        .to_string(),
                ));
            }
            Settlement::Canceled => {
                session.close();
                warn!("Flow {} canceled by the user", flow_id);
                return Err(AppError::Canceled);
            }
        };
        let verifier = callback.get("oauth_verifier").ok_or_else(|| {
            AppError::Protocol(
                "Browser authentication failed to complete. No oauth_verifier was returned"
                    .to_string(),
            )
        })?;

        // Leg 3: access token, signed with a fresh parameter set carrying
        // the request token.
        let mut access_params = engine.oauth_parameters(client_id)?;
        access_params.insert("oauth_token", request_token.as_str());
        let mut verifier_params = ParameterSet::new();
        verifier_params.insert("oauth_verifier", verifier);
        let signed = engine.create_signature(
            "POST",
            &provider.access_token_endpoint,
            &access_params,
            &verifier_params,
            client_secret,
            None,
        )?;

        let result = self
            .http
            .post_form(
                &provider.access_token_endpoint,
                &[
                    ("Authorization".to_string(), signed.authorization_header),
                    ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
                ],
                format!("oauth_verifier={}", percent_encode(verifier)),
            )
            .await;

        // Let any final navigation settle before tearing the surface down.
        tokio::time::sleep(Duration::from_millis(CLOSE_GRACE_MS)).await;
        session.close();

        let access = ParameterSet::parse(&result?);
        if !access.contains("oauth_token_secret") {
            warn!("Flow {} access token response had no secret", flow_id);
            return Err(AppError::Protocol(
                "Oauth access token was not received".to_string(),
            ));
        }

        info!("Signed flow {} completed", flow_id);
        Ok(TokenGrant::from(access))
    }
}

/// Drive the interceptor over the session's events until it settles. A
/// closed event channel counts as cancellation; an elapsed timeout maps to
/// [`AppError::Timeout`].
async fn await_settlement(
    session: &mut SurfaceSession,
    interceptor: &mut RedirectInterceptor,
    timeout: Option<Duration>,
) -> AppResult<Settlement> {
    let drive = async {
        loop {
            match session.next_event().await {
                Some(event) => {
                    if let Some(settlement) = interceptor.on_event(&event) {
                        break settlement;
                    }
                }
                None => break Settlement::Canceled,
            }
        }
    };
    match timeout {
        Some(limit) => tokio::time::timeout(limit, drive)
            .await
            .map_err(|_| AppError::Timeout),
        None => Ok(drive.await),
    }
}

/// Build the implicit-flow authorization URL. Scope entries are joined by
/// literal commas.
fn build_authorize_url(
    provider: &ImplicitProvider,
    client_id: &str,
    scopes: &[String],
    redirect: &str,
) -> String {
    let mut url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=token&scope={}",
        provider.authorize_endpoint,
        client_id,
        redirect,
        scopes.join(",")
    );
    if let Some(display) = &provider.display {
        url.push_str(&format!("&display={}", display));
    }
    url
}
