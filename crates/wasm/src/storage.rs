//! Browser storage helpers and URL parsing

use gloo_storage::{LocalStorage, Storage};
use nexus_core::{KeyValueStore, NexusError, Provider, Result, DEFAULT_USER_ID};

const USER_ID_KEY: &str = "nexus-user-id";
const PROVIDERS_KEY: &str = "nexus-providers";

// ============================================================================
// localStorage-backed preferences
// ============================================================================

/// `KeyValueStore` over `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::set(key, value).map_err(|e| NexusError::Storage(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

// ============================================================================
// User and provider selection
// ============================================================================

/// `?user_id=` from the page URL, then the stored id, then the default.
/// An id taken from the URL is remembered for later visits.
pub fn resolve_user_id(store: &mut BrowserStore) -> u64 {
    if let Some(id) = query_param("user_id").and_then(|v| v.parse().ok()) {
        if let Err(e) = store.set(USER_ID_KEY, &id.to_string()) {
            tracing::warn!("Could not remember user id: {}", e);
        }
        return id;
    }
    store
        .get(USER_ID_KEY)
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_USER_ID)
}

/// Providers picked on the home screen; Steam until the user chooses
pub fn load_providers(store: &BrowserStore) -> Vec<Provider> {
    match store.get(PROVIDERS_KEY) {
        Some(list) => list
            .split(',')
            .filter_map(|name| Provider::ALL.into_iter().find(|p| p.as_str() == name.trim()))
            .collect(),
        None => vec![Provider::Steam],
    }
}

pub fn save_providers(store: &mut BrowserStore, providers: &[Provider]) {
    let list = providers
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(",");
    if let Err(e) = store.set(PROVIDERS_KEY, &list) {
        tracing::warn!("Could not save providers: {}", e);
    }
}

// ============================================================================
// Location helpers
// ============================================================================

pub fn query_param(name: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| {
            search.strip_prefix('?').and_then(|s| {
                s.split('&')
                    .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
                    .map(str::to_string)
            })
        })
        .filter(|v| !v.is_empty())
}

pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Current page, used as the post-login redirect
pub fn current_href() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// The API is served from the same origin under `/api/v1`
pub fn api_base_url() -> String {
    format!("{}/api/v1", origin())
}
