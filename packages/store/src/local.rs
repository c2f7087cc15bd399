//! # `localStorage` key-value store: browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. It
//! writes straight into `window.localStorage` with no namespacing, so the keys
//! are exactly `access_token` and `refresh_token`.
//!
//! `LocalStore` is a zero-size struct that looks the storage object up on every
//! call. `web_sys::Storage` is not `Send`, and the lookup is cheap.
//!
//! All methods swallow host errors (storage disabled, quota exceeded, private
//! mode): reads return `None`, writes do nothing. An unavailable store
//! degrades to "not logged in".

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        let storage = web_sys::window()?.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage is not available");
        }
        storage
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("Failed to write {key} to localStorage");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
