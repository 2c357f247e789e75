//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Native builds read the process environment at startup. The WASM build has
//! no process environment, so the same keys are also captured at compile
//! time with `option_env!` and used as the fallback.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeSet;

pub const API_BASE_URL_VAR: &str = "PPR_API_BASE_URL";
pub const ENTRY_PAGE_VAR: &str = "PPR_ENTRY_PAGE";
pub const PROTECTED_PAGES_VAR: &str = "PPR_PROTECTED_PAGES";

/// The single unauthenticated landing page.
pub const DEFAULT_ENTRY_PAGE: &str = "index.html";

/// Errors produced while building [`AppConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `PPR_PROTECTED_PAGES` named a page this client does not have.
    #[error("unknown page in PPR_PROTECTED_PAGES: {0}")]
    UnknownPage(String),

    /// `PPR_PROTECTED_PAGES` listed the login page.
    #[error("the entry page cannot require authentication")]
    EntryPageGuarded,

    /// `PPR_ENTRY_PAGE` was set to a blank value.
    #[error("PPR_ENTRY_PAGE must not be empty")]
    EmptyEntryPage,
}

/// Routable pages of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    /// Login form; also the entry page.
    Login,
    /// Summary charts.
    Dashboard,
    /// PPR list with CRUD actions.
    Ppr,
    /// Monthly progress for one PPR.
    PprProgress,
}

impl Page {
    /// Configuration slug used in `PPR_PROTECTED_PAGES`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Login => "index",
            Self::Dashboard => "dashboard",
            Self::Ppr => "ppr",
            Self::PprProgress => "ppr-progress",
        }
    }

    /// Parse a configuration slug. `login` is accepted as an alias of `index`.
    #[must_use]
    pub fn from_slug(raw: &str) -> Option<Self> {
        match raw {
            "index" | "login" => Some(Self::Login),
            "dashboard" => Some(Self::Dashboard),
            "ppr" => Some(Self::Ppr),
            "ppr-progress" => Some(Self::PprProgress),
            _ => None,
        }
    }
}

/// Which pages run the auth guard on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardPolicy {
    protected: BTreeSet<Page>,
}

impl GuardPolicy {
    /// Build a policy from a page set. The login page is never guarded.
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        let protected = pages.into_iter().filter(|p| *p != Page::Login).collect();
        Self { protected }
    }

    #[must_use]
    pub fn requires_auth(&self, page: Page) -> bool {
        self.protected.contains(&page)
    }

    pub fn protected_pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.protected.iter().copied()
    }
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self::new([Page::Dashboard, Page::Ppr, Page::PprProgress])
    }
}

/// Typed client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Prefix for REST calls; empty means same origin.
    pub api_base_url: String,
    /// Where unauthenticated visitors are sent.
    pub entry_page: String,
    /// Pages that require a live session.
    pub guard: GuardPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { api_base_url: String::new(), entry_page: DEFAULT_ENTRY_PAGE.to_owned(), guard: GuardPolicy::default() }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PPR_API_BASE_URL`: default empty (same origin)
    /// - `PPR_ENTRY_PAGE`: default `index.html`
    /// - `PPR_PROTECTED_PAGES`: comma-separated slugs, default
    ///   `dashboard,ppr,ppr-progress`; an empty value disables the guard
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an unknown page slug, a guarded entry page,
    /// or a blank entry page.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| compile_time_var(key)))
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_BASE_URL_VAR)
            .unwrap_or_default()
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let entry_page = parse_entry_page(lookup(ENTRY_PAGE_VAR).as_deref())?;
        let guard = parse_protected_pages(lookup(PROTECTED_PAGES_VAR).as_deref())?;
        Ok(Self { api_base_url, entry_page, guard })
    }

    /// Absolute or origin-relative URL for an API path such as `/ppr/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }

    /// Navigation target for a page.
    #[must_use]
    pub fn page_href(&self, page: Page) -> String {
        match page {
            Page::Login => self.entry_page.clone(),
            other => other.slug().to_owned(),
        }
    }
}

fn parse_entry_page(raw: Option<&str>) -> Result<String, ConfigError> {
    match raw.map(str::trim) {
        None => Ok(DEFAULT_ENTRY_PAGE.to_owned()),
        Some("") => Err(ConfigError::EmptyEntryPage),
        Some(page) => Ok(page.to_owned()),
    }
}

fn parse_protected_pages(raw: Option<&str>) -> Result<GuardPolicy, ConfigError> {
    let Some(raw) = raw else {
        return Ok(GuardPolicy::default());
    };
    let mut pages = Vec::new();
    for slug in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match Page::from_slug(slug) {
            Some(Page::Login) => return Err(ConfigError::EntryPageGuarded),
            Some(page) => pages.push(page),
            None => return Err(ConfigError::UnknownPage(slug.to_owned())),
        }
    }
    Ok(GuardPolicy::new(pages))
}

fn compile_time_var(key: &str) -> Option<String> {
    let value = match key {
        API_BASE_URL_VAR => option_env!("PPR_API_BASE_URL"),
        ENTRY_PAGE_VAR => option_env!("PPR_ENTRY_PAGE"),
        PROTECTED_PAGES_VAR => option_env!("PPR_PROTECTED_PAGES"),
        _ => None,
    };
    value.map(str::to_owned)
}
