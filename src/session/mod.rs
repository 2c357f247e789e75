//! Authentication session: token storage, expiry validation, authenticated
//! requests, and the page guard.
//!
//! DESIGN
//! ======
//! Storage, clock, transport, and navigation are traits so the whole session
//! lifecycle runs in plain unit tests; the browser implementations are thin
//! `web-sys`/`gloo-net` adapters behind the `csr` feature.

pub mod clock;
pub mod context;
pub mod navigator;
pub mod store;
pub mod token;

pub use context::{AuthOutcome, FetchError, SessionContext, SessionState};
