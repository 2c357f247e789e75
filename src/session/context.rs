//! Session context: validator, authenticated request wrapper, page guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionContext` is built at application start and handed to every
//! page through Leptos context. All session reads go through it, and so does
//! every request that needs the bearer token.
//!
//! ERROR HANDLING
//! ==============
//! Token problems never surface as errors: a missing, malformed, or expired
//! token is simply `Unauthenticated`. A 401 from the backend tears the
//! session down and comes back as `AuthOutcome::SessionExpired`, which the
//! caller must handle alongside the normal response.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::navigator::{BrowserNavigator, Navigator};
use super::store::{BrowserStore, KeyValueStore, SessionStore};
use super::token::decode_claims;
use crate::config::{AppConfig, Page};
use crate::net::transport::{FetchTransport, HttpRequest, HttpResponse, RequestOptions, Transport, TransportError};
use crate::net::types::UserProfile;

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Derived on every call; never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// A token is stored and its `exp` lies in the future.
    Authenticated,
    /// No token, or one that is malformed or expired.
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

/// Result of an authenticated request that reached the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Any non-401 response, untouched.
    Authorized(HttpResponse),
    /// The server answered 401. The session has been cleared and the browser
    /// sent to the entry page.
    SessionExpired,
}

/// Failures of [`SessionContext::authenticated_fetch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No token is stored. Nothing was sent.
    #[error("no authentication token stored")]
    MissingCredential,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Shared session services for the whole application.
#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    clock: Arc<dyn Clock>,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    config: Arc<AppConfig>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").field("config", &self.config).finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { store: SessionStore::new(storage), clock, transport, navigator, config: Arc::new(config) }
    }

    /// `localStorage`, `Date.now()`, `fetch`, and `window.location`.
    #[must_use]
    pub fn browser(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(BrowserStore),
            Arc::new(SystemClock),
            Arc::new(FetchTransport),
            Arc::new(BrowserNavigator),
        )
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Raw transport for requests that must not carry the bearer token.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn navigate_to(&self, page: Page) {
        self.navigator.navigate(&self.config.page_href(page));
    }

    /// Local calendar year from the session clock.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.clock.current_year()
    }

    /// Navigate to an arbitrary href (e.g. a page with a query string).
    pub fn navigate_href(&self, href: &str) {
        self.navigator.navigate(href);
    }

    // =========================================================================
    // VALIDATOR
    // =========================================================================

    /// Compute the session state from the stored token and the clock.
    #[must_use]
    pub fn state(&self) -> SessionState {
        let Some(token) = self.store.load() else {
            return SessionState::Unauthenticated;
        };
        match decode_claims(&token) {
            Ok(claims) if claims.is_valid_at(self.clock.now_secs()) => SessionState::Authenticated,
            Ok(_) => SessionState::Unauthenticated,
            Err(e) => {
                log::debug!("stored token rejected: {e}");
                SessionState::Unauthenticated
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Profile of the signed-in user, if one is stored.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.store.load_profile()
    }

    // =========================================================================
    // SESSION LIFECYCLE
    // =========================================================================

    /// Store a freshly issued token and its profile.
    pub fn start_session(&self, token: &str, profile: &UserProfile) {
        self.store.save(token);
        self.store.save_profile(profile);
        log::info!("session started for {}", profile.username);
    }

    /// Clear the session and go to the entry page.
    pub fn end_session(&self) {
        self.store.clear();
        log::info!("session ended");
        self.navigate_to(Page::Login);
    }

    // =========================================================================
    // PAGE GUARD
    // =========================================================================

    /// Send unauthenticated visitors to the entry page.
    ///
    /// No side effects when the session is valid; safe to call repeatedly.
    pub fn require_auth(&self) -> SessionState {
        let state = self.state();
        if !state.is_authenticated() {
            log::info!("unauthenticated visit; redirecting to {}", self.config.entry_page);
            self.navigate_to(Page::Login);
        }
        state
    }

    /// Run [`Self::require_auth`] if the configured policy protects `page`.
    ///
    /// Returns `true` when the page may continue initializing.
    pub fn guard_page(&self, page: Page) -> bool {
        if !self.config.guard.requires_auth(page) {
            return true;
        }
        self.require_auth().is_authenticated()
    }

    // =========================================================================
    // AUTHENTICATED REQUESTS
    // =========================================================================

    /// Send a request with the stored bearer token.
    ///
    /// Caller headers are kept; `Authorization` and `Content-Type` are
    /// replaced by the wrapper's values. A 401 clears the session, navigates
    /// to the entry page, and yields [`AuthOutcome::SessionExpired`].
    ///
    /// # Errors
    ///
    /// [`FetchError::MissingCredential`] if no token is stored (nothing is
    /// sent), or [`FetchError::Transport`] if the request never completed.
    pub async fn authenticated_fetch(&self, url: &str, options: RequestOptions) -> Result<AuthOutcome, FetchError> {
        let Some(token) = self.store.load() else {
            return Err(FetchError::MissingCredential);
        };
        let RequestOptions { method, headers, body } = options;
        let headers = merge_auth_headers(headers, &token);
        let request = HttpRequest { url: url.to_owned(), method, headers, body };

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            log::warn!("{} {url} returned 401; clearing session", method.as_str());
            self.store.clear();
            self.navigate_to(Page::Login);
            return Ok(AuthOutcome::SessionExpired);
        }
        Ok(AuthOutcome::Authorized(response))
    }
}

/// Keep caller headers, then append the bearer and JSON content-type headers,
/// dropping any caller header with the same name (case-insensitive).
fn merge_auth_headers(caller: Vec<(String, String)>, token: &str) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = caller
        .into_iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION) && !name.eq_ignore_ascii_case(CONTENT_TYPE))
        .collect();
    merged.push((AUTHORIZATION.to_owned(), format!("Bearer {token}")));
    merged.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
    merged
}
