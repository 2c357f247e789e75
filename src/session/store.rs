//! Durable session state: the bearer token and the user profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backed by `localStorage` in the browser and by an in-memory map natively.
//! The token and profile live under fixed keys so sessions survive page
//! loads; clearing always removes both.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::UserProfile;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON-encoded user profile.
pub const PROFILE_KEY: &str = "userData";

/// Synchronous string key/value storage, shaped like the Web Storage API.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local storage for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut items)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) {
        self.with_items(|items| {
            items.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove_item(&self, key: &str) {
        self.with_items(|items| {
            items.remove(key);
        });
    }
}

/// `window.localStorage`. Reads return `None` and writes are dropped when
/// storage is unavailable (no window, privacy mode, quota).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "csr")]
impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            Self::storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = Self::storage() else {
                log::warn!("localStorage unavailable; dropping write to {key}");
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write to {key}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = Self::storage() else {
                log::warn!("localStorage unavailable; cannot remove {key}");
                return;
            };
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage rejected removal of {key}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Token + profile persistence over any [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Persist `token`, replacing any previous one. Not validated.
    pub fn save(&self, token: &str) {
        self.backend.set_item(TOKEN_KEY, token);
    }

    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.backend.get_item(TOKEN_KEY)
    }

    /// Remove the token and the profile together.
    pub fn clear(&self) {
        // Profile first: a reader never sees a profile without its token.
        self.backend.remove_item(PROFILE_KEY);
        self.backend.remove_item(TOKEN_KEY);
    }

    pub fn save_profile(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(raw) => self.backend.set_item(PROFILE_KEY, &raw),
            Err(e) => log::warn!("failed to encode user profile: {e}"),
        }
    }

    /// Stored profile, or `None` when absent or not a valid profile.
    #[must_use]
    pub fn load_profile(&self) -> Option<UserProfile> {
        let raw = self.backend.get_item(PROFILE_KEY)?;
        serde_json::from_str(&raw).ok()
    }
}
