use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.entry_page, DEFAULT_ENTRY_PAGE);
    assert!(cfg.guard.requires_auth(Page::Dashboard));
    assert!(cfg.guard.requires_auth(Page::Ppr));
    assert!(cfg.guard.requires_auth(Page::PprProgress));
    assert!(!cfg.guard.requires_auth(Page::Login));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        (API_BASE_URL_VAR, " https://api.example.test/ "),
        (ENTRY_PAGE_VAR, "login.html"),
        (PROTECTED_PAGES_VAR, "ppr, ppr-progress"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.entry_page, "login.html");
    assert!(!cfg.guard.requires_auth(Page::Dashboard));
    assert!(cfg.guard.requires_auth(Page::Ppr));
    assert!(cfg.guard.requires_auth(Page::PprProgress));
}

#[test]
fn empty_protected_pages_disables_guard() {
    let cfg = AppConfig::from_lookup(lookup_from(&[(PROTECTED_PAGES_VAR, "")])).unwrap();
    assert_eq!(cfg.guard.protected_pages().count(), 0);
}

#[test]
fn unknown_page_errors() {
    let err = AppConfig::from_lookup(lookup_from(&[(PROTECTED_PAGES_VAR, "dashboard,reports")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownPage("reports".to_owned()));
    assert!(err.to_string().contains("reports"));
}

#[test]
fn guarding_entry_page_errors() {
    let err = AppConfig::from_lookup(lookup_from(&[(PROTECTED_PAGES_VAR, "index,ppr")])).unwrap_err();
    assert_eq!(err, ConfigError::EntryPageGuarded);
}

#[test]
fn blank_entry_page_errors() {
    let err = AppConfig::from_lookup(lookup_from(&[(ENTRY_PAGE_VAR, "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::EmptyEntryPage);
}

#[test]
fn guard_policy_never_protects_login() {
    let policy = GuardPolicy::new([Page::Login, Page::Dashboard]);
    assert!(!policy.requires_auth(Page::Login));
    assert_eq!(policy.protected_pages().collect::<Vec<_>>(), vec![Page::Dashboard]);
}

#[test]
fn endpoint_prefixes_base_url() {
    let mut cfg = AppConfig::default();
    assert_eq!(cfg.endpoint("/ppr/"), "/ppr/");
    cfg.api_base_url = "http://localhost:8000".to_owned();
    assert_eq!(cfg.endpoint("/auth/login"), "http://localhost:8000/auth/login");
}

#[test]
fn page_href_maps_login_to_entry_page() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.page_href(Page::Login), "index.html");
    assert_eq!(cfg.page_href(Page::Dashboard), "dashboard");
    assert_eq!(cfg.page_href(Page::PprProgress), "ppr-progress");
}

#[test]
fn page_slugs_round_trip() {
    for page in [Page::Login, Page::Dashboard, Page::Ppr, Page::PprProgress] {
        assert_eq!(Page::from_slug(page.slug()), Some(page));
    }
    assert_eq!(Page::from_slug("login"), Some(Page::Login));
    assert_eq!(Page::from_slug("nope"), None);
}
