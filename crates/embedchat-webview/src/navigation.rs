use std::sync::{Arc, RwLock};

use tracing::{debug, warn};
use url::Url;

use crate::surface::BLANK_PAGE;

/// Opens a URL outside the chat surface, normally in the system browser.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Opener that only logs. Used when the host supplies none.
pub struct LogOnlyOpener;

impl ExternalOpener for LogOnlyOpener {
    fn open(&self, url: &str) {
        warn!(url, "no external opener configured, link dropped");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Load inside the chat surface.
    Allow,
    /// Handed to the external opener; the surface must not follow it.
    Intercepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateDecision {
    Proceed,
    Cancel,
}

// =============================================================================
// POLICY
// =============================================================================

struct PolicyState {
    base_url: String,
    origin: Option<(String, Option<String>, Option<u16>)>,
    local_development: bool,
}

impl PolicyState {
    fn new(base_url: &str, local_development: bool) -> Self {
        let origin = Url::parse(base_url).ok().map(|u| origin_of(&u));
        if origin.is_none() {
            warn!(base_url, "session base URL does not parse, all navigation will be intercepted");
        }
        Self {
            base_url: base_url.to_string(),
            origin,
            local_development,
        }
    }
}

fn origin_of(url: &Url) -> (String, Option<String>, Option<u16>) {
    (
        url.scheme().to_string(),
        url.host_str().map(str::to_ascii_lowercase),
        url.port_or_known_default(),
    )
}

/// Decides which top-level navigations stay in the chat surface.
///
/// Clones share state, so a handler installed in the browser keeps seeing
/// updates made through [`NavigationPolicy::update`].
#[derive(Clone)]
pub struct NavigationPolicy {
    state: Arc<RwLock<PolicyState>>,
    opener: Arc<dyn ExternalOpener>,
}

impl NavigationPolicy {
    pub fn new(base_url: &str, local_development: bool, opener: Arc<dyn ExternalOpener>) -> Self {
        Self {
            state: Arc::new(RwLock::new(PolicyState::new(base_url, local_development))),
            opener,
        }
    }

    /// Point the policy at a new base URL, e.g. after an API host change.
    pub fn update(&self, base_url: &str, local_development: bool) {
        let next = PolicyState::new(base_url, local_development);
        match self.state.write() {
            Ok(mut state) => *state = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&PolicyState) -> R) -> R {
        match self.state.read() {
            Ok(state) => f(&state),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    pub fn base_url(&self) -> String {
        self.read(|s| s.base_url.clone())
    }

    /// True if `url` starts with the session base URL.
    pub fn matches_base(&self, url: &str) -> bool {
        self.read(|s| url.starts_with(&s.base_url))
    }

    fn same_origin(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let candidate = origin_of(&parsed);
        self.read(|s| s.origin.as_ref() == Some(&candidate))
    }

    /// Same scheme, host and port as the base URL stay in the surface.
    /// Everything else goes to the external opener.
    pub fn decide(&self, url: &str) -> NavigationDecision {
        if url == BLANK_PAGE || self.same_origin(url) {
            debug!(url, "navigation allowed");
            return NavigationDecision::Allow;
        }
        debug!(url, "navigation intercepted, opening externally");
        self.opener.open(url);
        NavigationDecision::Intercepted
    }

    /// Certificate errors cancel the load, except on the local development
    /// endpoint for URLs under the session base URL.
    pub fn certificate_decision(&self, url: &str) -> CertificateDecision {
        let allowed = self.read(|s| s.local_development && url.starts_with(&s.base_url));
        if allowed {
            warn!(url, "accepting untrusted certificate for local development");
            CertificateDecision::Proceed
        } else {
            CertificateDecision::Cancel
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
