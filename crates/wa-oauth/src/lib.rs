//! OAuth browser flows and request signing for WebviewAuth

pub mod flow;
pub mod providers;

// Re-export public API
pub use flow::{
    create_nonce, percent_encode, BrowserSurface, FlowId, FlowOptions, HttpExchanger,
    OauthFlowManager, ParameterSet, ParameterSource, RedirectInterceptor, ReqwestExchanger,
    Settlement, SignatureEngine, SignatureResult, SurfaceControl, SurfaceEvent, SurfaceOptions,
    SurfaceSession, TokenGrant,
};
pub use providers::{ImplicitProvider, SignedProvider};
