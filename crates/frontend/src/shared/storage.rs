//! JSON persistence over a string-keyed store.
//!
//! The browser implementation wraps `localStorage` and fails soft: reads
//! degrade to the caller's default and writes are best-effort no-ops when
//! the environment has no storage (e.g. a non-browser context). Tests run
//! against [`MemoryStore`]. Last write wins; there are no transactions.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Minimal contract of the underlying string store.
pub trait StringStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Browser `localStorage`, scoped to the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl StringStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for tests and non-browser contexts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Read a JSON value, returning `default` when the key is absent or the
/// stored blob does not parse.
pub fn get_json<S: StringStore, T: DeserializeOwned>(store: &S, key: &str, default: T) -> T {
    match store.get(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Discarding corrupt value under '{}': {}", key, err);
                default
            }
        },
        None => default,
    }
}

/// Serialize and write a JSON value, best-effort.
pub fn set_json<S: StringStore, T: Serialize + ?Sized>(store: &S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(err) => log::warn!("Failed to serialize value for '{}': {}", key, err),
    }
}
