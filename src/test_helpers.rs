//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::config::AppConfig;
use crate::net::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::net::types::{Role, UserProfile};
use crate::session::SessionContext;
use crate::session::clock::FixedClock;
use crate::session::navigator::RecordingNavigator;
use crate::session::store::MemoryStore;

/// Fixed "now" used by [`harness`]: 2023-11-14T22:13:20Z.
pub const NOW_SECS: i64 = 1_700_000_000;
pub const NOW: f64 = 1_700_000_000.0;

// =============================================================================
// MockTransport
// =============================================================================

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(HttpResponse::new(status, body.to_string()));
    }

    pub fn push_err(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".into())))
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A session context wired to in-memory fakes, with handles to each fake.
pub struct Harness {
    pub session: SessionContext,
    pub storage: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness() -> Harness {
    harness_with(AppConfig::default())
}

pub fn harness_with(config: AppConfig) -> Harness {
    let storage = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(NOW));
    let transport = Arc::new(MockTransport::default());
    let navigator = Arc::new(RecordingNavigator::new());
    let session = SessionContext::new(config, storage.clone(), clock.clone(), transport.clone(), navigator.clone());
    Harness { session, storage, clock, transport, navigator }
}

/// Unsigned `header.payload.sig` token with the given `exp`.
pub fn token_with_exp(exp: i64) -> String {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": exp, "sub": "ana" }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

/// A token valid for one hour past [`NOW`].
pub fn live_token() -> String {
    token_with_exp(NOW_SECS + 3600)
}

pub fn profile(username: &str, role: Role) -> UserProfile {
    UserProfile { user_id: Some(7), username: username.to_owned(), role, ..UserProfile::default() }
}
