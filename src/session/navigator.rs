//! Hard page navigation.
//!
//! Session loss is handled by leaving the page entirely rather than by an
//! in-app route change, so every piece of page state is discarded with it.

use std::sync::Mutex;

pub trait Navigator: Send + Sync {
    /// Navigate the browser to `href`.
    fn navigate(&self, href: &str);
}

/// Sets `window.location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, href: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(href).is_err() {
                    log::warn!("navigation to {href} failed");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("navigation to {href} skipped outside the browser");
        }
    }
}

/// Records navigation targets instead of following them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every target navigated to, oldest first.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, href: &str) {
        self.visited
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(href.to_owned());
    }
}
