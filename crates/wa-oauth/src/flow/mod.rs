//! Browser-driven OAuth authorization flows
//!
//! This module obtains OAuth tokens by opening an externally-owned browser
//! surface at a provider's authorization endpoint and intercepting the
//! redirect navigation that carries the result.
//!
//! # Components
//! - OAuth 1.0a request signing (HMAC-SHA1 base string + Authorization header)
//! - Redirect interception over the surface's navigation event stream
//! - Implicit-grant flow (token in the redirect fragment)
//! - Three-legged signed flow (request token, user authorization, access token)
//!
//! # Usage Example
//! ```no_run
//! use std::sync::Arc;
//! use wa_oauth::{OauthFlowManager, ReqwestExchanger};
//!
//! # async fn run(surface: Arc<dyn wa_oauth::BrowserSurface>) -> wa_types::AppResult<()> {
//! let manager = OauthFlowManager::new(surface, Arc::new(ReqwestExchanger::new()))
//!     .with_system_hmac();
//! let grant = manager.vkontakte("CLIENT_ID", &["friends".into(), "wall".into()]).await?;
//! println!("token: {:?}", grant.access_token());
//! # Ok(())
//! # }
//! ```

mod exchange;
mod interceptor;
mod manager;
mod params;
mod signature;
mod surface;
mod types;

// Re-export public API
pub use exchange::{HttpExchanger, ReqwestExchanger};
pub use interceptor::{ParameterSource, RedirectInterceptor, Settlement};
pub use manager::OauthFlowManager;
pub use params::ParameterSet;
pub use signature::{create_nonce, percent_encode, SignatureEngine, SignatureResult};
pub use surface::{BrowserSurface, SurfaceControl, SurfaceEvent, SurfaceOptions, SurfaceSession};
pub use types::{FlowId, FlowOptions, TokenGrant};
