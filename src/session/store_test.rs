use super::*;
use crate::net::types::Role;

fn store() -> (SessionStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (SessionStore::new(backend.clone()), backend)
}

// =============================================================================
// token
// =============================================================================

#[test]
fn load_is_none_before_save() {
    let (store, _) = store();
    assert!(store.load().is_none());
}

#[test]
fn save_then_load_returns_token() {
    let (store, backend) = store();
    store.save("a.b.c");
    assert_eq!(store.load().as_deref(), Some("a.b.c"));
    assert_eq!(backend.get_item(TOKEN_KEY).as_deref(), Some("a.b.c"));
}

#[test]
fn save_overwrites_previous_token() {
    let (store, _) = store();
    store.save("first");
    store.save("second");
    assert_eq!(store.load().as_deref(), Some("second"));
}

#[test]
fn save_does_not_validate() {
    let (store, _) = store();
    store.save("definitely not a jwt");
    assert_eq!(store.load().as_deref(), Some("definitely not a jwt"));
}

// =============================================================================
// profile
// =============================================================================

#[test]
fn profile_round_trips_through_json() {
    let (store, backend) = store();
    let profile = UserProfile { user_id: Some(3), username: "ana".into(), role: Role::Planificador, ..UserProfile::default() };
    store.save_profile(&profile);
    assert_eq!(store.load_profile(), Some(profile));
    let raw: serde_json::Value = serde_json::from_str(&backend.get_item(PROFILE_KEY).unwrap()).unwrap();
    assert_eq!(raw["username"], "ana");
    assert_eq!(raw["role"], "planificador");
}

#[test]
fn load_profile_is_none_when_absent() {
    let (store, _) = store();
    assert!(store.load_profile().is_none());
}

#[test]
fn load_profile_is_none_on_invalid_json() {
    let (store, backend) = store();
    backend.set_item(PROFILE_KEY, "{not json");
    assert!(store.load_profile().is_none());
}

#[test]
fn load_profile_is_none_on_wrong_shape() {
    let (store, backend) = store();
    backend.set_item(PROFILE_KEY, r#""ana""#);
    assert!(store.load_profile().is_none());
    backend.set_item(PROFILE_KEY, r#"{"role":"admin"}"#);
    assert!(store.load_profile().is_none());
}

#[test]
fn load_profile_accepts_profile_written_by_other_clients() {
    let (store, backend) = store();
    backend.set_item(PROFILE_KEY, r#"{"username":"luis","role":"responsable_ppr","theme":"dark"}"#);
    let profile = store.load_profile().unwrap();
    assert_eq!(profile.username, "luis");
    assert_eq!(profile.role, Role::ResponsablePpr);
    assert_eq!(profile.extra.get("theme"), Some(&serde_json::json!("dark")));
}

// =============================================================================
// clear
// =============================================================================

#[test]
fn clear_removes_token_and_profile() {
    let (store, backend) = store();
    store.save("a.b.c");
    store.save_profile(&UserProfile { username: "ana".into(), ..UserProfile::default() });
    store.clear();
    assert!(store.load().is_none());
    assert!(store.load_profile().is_none());
    assert!(backend.get_item(TOKEN_KEY).is_none());
    assert!(backend.get_item(PROFILE_KEY).is_none());
}

#[test]
fn clear_is_idempotent() {
    let (store, _) = store();
    store.clear();
    store.clear();
    assert!(store.load().is_none());
}

#[test]
fn clear_leaves_unrelated_keys() {
    let (store, backend) = store();
    backend.set_item("theme", "dark");
    store.save("a.b.c");
    store.clear();
    assert_eq!(backend.get_item("theme").as_deref(), Some("dark"));
}

// =============================================================================
// BrowserStore outside the browser
// =============================================================================

#[cfg(not(feature = "csr"))]
#[test]
fn browser_store_is_inert_natively() {
    let store = BrowserStore;
    store.set_item(TOKEN_KEY, "x");
    assert!(store.get_item(TOKEN_KEY).is_none());
    store.remove_item(TOKEN_KEY);
}

#[cfg(not(feature = "csr"))]
#[test]
fn clear_over_unavailable_storage_is_a_no_op() {
    let session = SessionStore::new(Arc::new(BrowserStore));
    session.clear();
    assert!(session.load().is_none());
    assert!(session.load_profile().is_none());
}
