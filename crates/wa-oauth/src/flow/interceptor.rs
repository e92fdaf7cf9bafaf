//! Redirect interception
//!
//! Watches a surface's navigation events for the provider redirect and
//! settles exactly once. Providers are inconsistent about the redirect
//! scheme, so both `http` and `https` variants of the target are accepted.

use super::params::ParameterSet;
use super::surface::SurfaceEvent;

/// Where the redirect carries its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    /// After `#` (implicit grant).
    Fragment,
    /// After `?` (three-legged callback).
    Query,
}

/// Terminal outcome of one interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Redirect matched and all required parameters were present.
    Matched(ParameterSet),
    /// Redirect matched but a required parameter was absent.
    MissingParameter(String),
    /// The user closed the surface first.
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterceptState {
    Watching,
    Settled,
}

/// One-shot matcher over a navigation event stream.
///
/// Feed every event through [`RedirectInterceptor::on_event`]; the first
/// event that settles the interception yields `Some(Settlement)` and every
/// event after that yields `None`.
#[derive(Debug)]
pub struct RedirectInterceptor {
    /// Redirect target with query/fragment and scheme stripped.
    target: String,
    source: ParameterSource,
    required: Vec<String>,
    state: InterceptState,
}

impl RedirectInterceptor {
    pub fn new(redirect_url: &str, source: ParameterSource) -> Self {
        Self {
            target: strip_scheme(strip_trailer(redirect_url)).to_string(),
            source,
            required: Vec::new(),
            state: InterceptState::Watching,
        }
    }

    /// Require `key` to be present in the extracted parameters; a matching
    /// redirect without it settles as [`Settlement::MissingParameter`].
    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    pub fn is_settled(&self) -> bool {
        self.state == InterceptState::Settled
    }

    /// Process one navigation event. Returns the settlement on the single
    /// transition out of the watching state, `None` otherwise.
    pub fn on_event(&mut self, event: &SurfaceEvent) -> Option<Settlement> {
        if self.state == InterceptState::Settled {
            return None;
        }
        match event {
            SurfaceEvent::Exit => {
                self.state = InterceptState::Settled;
                Some(Settlement::Canceled)
            }
            SurfaceEvent::LoadStart { url } => {
                if !self.matches(url) {
                    return None;
                }
                self.state = InterceptState::Settled;
                let params = ParameterSet::parse(self.extract(url));
                for key in &self.required {
                    if !params.contains(key) {
                        return Some(Settlement::MissingParameter(key.clone()));
                    }
                }
                Some(Settlement::Matched(params))
            }
        }
    }

    /// Compare scheme+host+path, ignoring query and fragment, accepting
    /// both `http` and `https` for the configured target.
    fn matches(&self, url: &str) -> bool {
        let base = strip_trailer(url);
        base == format!("http://{}", self.target) || base == format!("https://{}", self.target)
    }

    /// Slice of `url` carrying the parameters for the configured source;
    /// empty when the delimiter is absent.
    fn extract<'a>(&self, url: &'a str) -> &'a str {
        match self.source {
            ParameterSource::Fragment => url.split_once('#').map(|(_, rest)| rest).unwrap_or(""),
            ParameterSource::Query => {
                let query = url.split_once('?').map(|(_, rest)| rest).unwrap_or("");
                // A fragment may trail the query string.
                query.split('#').next().unwrap_or("")
            }
        }
    }
}

/// Strip the query string and fragment from a URL.
fn strip_trailer(url: &str) -> &str {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}

/// Strip a leading `http://` or `https://`.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(url: &str) -> SurfaceEvent {
        SurfaceEvent::LoadStart {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_non_matching_event_is_ignored() {
        let mut interceptor =
            RedirectInterceptor::new("https://oauth.vk.com/blank.html", ParameterSource::Fragment);
        assert_eq!(
            interceptor.on_event(&load("https://oauth.vk.com/authorize?client_id=1")),
            None
        );
        assert!(!interceptor.is_settled());
    }

    #[test]
    fn test_settles_once_on_matching_event() {
        let mut interceptor =
            RedirectInterceptor::new("https://oauth.vk.com/blank.html", ParameterSource::Fragment);

        assert_eq!(interceptor.on_event(&load("https://oauth.vk.com/login")), None);

        let settlement = interceptor
            .on_event(&load("https://oauth.vk.com/blank.html#access_token=XYZ&expires_in=3600"))
            .expect("matching event settles");
        match settlement {
            Settlement::Matched(params) => {
                assert_eq!(params.get("access_token"), Some("XYZ"));
                assert_eq!(params.get("expires_in"), Some("3600"));
            }
            other => panic!("unexpected settlement: {other:?}"),
        }

        // Inert after settlement.
        assert_eq!(
            interceptor.on_event(&load("https://oauth.vk.com/blank.html#access_token=OTHER")),
            None
        );
        assert_eq!(interceptor.on_event(&SurfaceEvent::Exit), None);
    }

    #[test]
    fn test_scheme_variants_both_match() {
        for event_url in [
            "http://oauth.vk.com/blank.html#access_token=A",
            "https://oauth.vk.com/blank.html#access_token=A",
        ] {
            let mut interceptor = RedirectInterceptor::new(
                "http://oauth.vk.com/blank.html",
                ParameterSource::Fragment,
            );
            assert!(interceptor.on_event(&load(event_url)).is_some());
        }
    }

    #[test]
    fn test_exit_while_watching_cancels() {
        let mut interceptor =
            RedirectInterceptor::new("http://localhost/callback", ParameterSource::Query);
        assert_eq!(
            interceptor.on_event(&SurfaceEvent::Exit),
            Some(Settlement::Canceled)
        );
        // A late exit must not re-trigger.
        assert_eq!(interceptor.on_event(&SurfaceEvent::Exit), None);
    }

    #[test]
    fn test_query_extraction() {
        let mut interceptor =
            RedirectInterceptor::new("http://localhost/callback", ParameterSource::Query);
        let settlement = interceptor
            .on_event(&load("http://localhost/callback?oauth_token=T1&oauth_verifier=V1"))
            .unwrap();
        match settlement {
            Settlement::Matched(params) => {
                assert_eq!(params.get("oauth_token"), Some("T1"));
                assert_eq!(params.get("oauth_verifier"), Some("V1"));
            }
            other => panic!("unexpected settlement: {other:?}"),
        }
    }

    #[test]
    fn test_query_extraction_drops_trailing_fragment() {
        let mut interceptor =
            RedirectInterceptor::new("http://localhost/callback", ParameterSource::Query);
        let settlement = interceptor
            .on_event(&load("http://localhost/callback?oauth_verifier=V1#frag=x"))
            .unwrap();
        assert_eq!(
            settlement,
            Settlement::Matched(ParameterSet::parse("oauth_verifier=V1"))
        );
    }

    #[test]
    fn test_missing_required_parameter() {
        let mut interceptor =
            RedirectInterceptor::new("http://localhost/callback", ParameterSource::Query)
                .require("oauth_verifier");
        let settlement = interceptor
            .on_event(&load("http://localhost/callback?oauth_token=T1"))
            .unwrap();
        assert_eq!(
            settlement,
            Settlement::MissingParameter("oauth_verifier".to_string())
        );
        assert!(interceptor.is_settled());
    }

    #[test]
    fn test_match_ignores_query_on_target() {
        // A target configured with its own query still matches on prefix.
        let mut interceptor =
            RedirectInterceptor::new("http://localhost/callback?x=1", ParameterSource::Query);
        assert!(interceptor.on_event(&load("http://localhost/callback?y=2")).is_some());
    }

    #[test]
    fn test_fragment_absent_yields_empty_set() {
        let mut interceptor =
            RedirectInterceptor::new("https://oauth.vk.com/blank.html", ParameterSource::Fragment);
        let settlement = interceptor
            .on_event(&load("https://oauth.vk.com/blank.html"))
            .unwrap();
        assert_eq!(settlement, Settlement::Matched(ParameterSet::new()));
    }
}
