//! Browser glue: `localStorage`, page origin and full-page redirects

use crate::error::StorageError;
use crate::session::SessionStore;
use web_sys::Storage;

/// Session store backed by `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

/// Get localStorage
fn get_local_storage() -> Result<Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        get_local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::operation(key, "getItem threw"))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        get_local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::operation(key, "setItem threw"))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        get_local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::operation(key, "removeItem threw"))
    }
}

/// Origin the application was loaded from, e.g. `https://example.org`
pub fn window_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

/// Navigate the whole page to `path`, discarding in-app state
pub fn hard_redirect(path: &str) {
    match web_sys::window() {
        Some(window) => {
            if let Err(error) = window.location().set_href(path) {
                tracing::error!(path, ?error, "Failed to redirect");
            }
        }
        None => tracing::error!(path, "No window available for redirect"),
    }
}
