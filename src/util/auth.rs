//! Page guard hook for route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page calls [`install_page_guard`] first thing, before it creates
//! resources or spawns requests. A rejected visitor is already being sent to
//! the entry page, so the page renders only a placeholder.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::Page;
use crate::session::SessionContext;

/// What a page should render after the guard ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Session is valid, or the page is not protected.
    Proceed,
    /// The browser is navigating to the entry page.
    Redirecting,
}

impl GuardVerdict {
    #[must_use]
    pub fn allowed(self) -> bool {
        self == Self::Proceed
    }
}

/// Run the configured guard for `page`.
pub fn install_page_guard(session: &SessionContext, page: Page) -> GuardVerdict {
    if session.guard_page(page) {
        GuardVerdict::Proceed
    } else {
        log::debug!("{} guard rejected the visit", page.slug());
        GuardVerdict::Redirecting
    }
}

/// The entry page skips the form for visitors who still hold a live session.
pub fn redirect_signed_in_visitor(session: &SessionContext) -> bool {
    if session.is_authenticated() {
        session.navigate_to(Page::Dashboard);
        return true;
    }
    false
}
