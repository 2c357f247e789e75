//! Thin wrappers over browser-only APIs.
//!
//! Outside the `csr` build these fall back to inert values so page logic
//! compiles and runs in native tests.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::time::Duration;

/// `window.confirm(message)`. Without a browser nothing is confirmed.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("confirm({message}) declined outside the browser");
        false
    }
}

/// Query string of the current page without the leading `?`.
pub fn location_query() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.trim_start_matches('?').to_owned())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}

/// First value of `key` in an `a=1&b=2` query string.
#[must_use]
pub fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Run `f` once after `delay` on the browser event loop.
///
/// Without a browser the callback is dropped.
pub fn run_after<F>(delay: Duration, f: F)
where
    F: FnOnce() + 'static,
{
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(delay).await;
            f();
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (delay, f);
    }
}
