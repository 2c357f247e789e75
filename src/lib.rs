//! # ppr-monitor
//!
//! Leptos + WASM client for the PPR (public program) monitoring dashboard.
//!
//! The crate is split the same way the pages consume it: `session` owns the
//! bearer token, expiry check, authenticated request wrapper and page guard;
//! `net` holds the transport seam, wire types and typed REST calls; `state`
//! keeps page-independent models (progress math, notices); `pages` and
//! `components` are thin Leptos shells over those modules.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Browser entry point: install logging and mount the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
