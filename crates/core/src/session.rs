//! Session storage and the shared session context
//!
//! The navigation guard and the API client never touch ambient storage
//! directly. Both are handed a [`SessionContext`], which wraps whatever
//! [`SessionStore`] backs the current environment: browser `localStorage`
//! on wasm32, an in-memory map everywhere else.

use crate::config::StorageKeys;
use crate::error::{CoreResult, StorageError};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Key-value store holding the session entries
#[cfg_attr(any(test, feature = "tests"), mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory session store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the token itself
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

fn poisoned(key: &str) -> StorageError {
    StorageError::operation(key, "store lock poisoned")
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned(key))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.remove(key);
        Ok(())
    }
}

/// Handle to the session shared by the router and the API client
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    keys: StorageKeys,
}

impl SessionContext {
    /// Create a context over a store using the default storage keys
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    /// Create a context over a store with custom storage keys
    pub fn with_keys(store: impl SessionStore + 'static, keys: StorageKeys) -> Self {
        Self {
            store: Arc::new(store),
            keys,
        }
    }

    /// Context backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Context backed by the browser's `localStorage`
    #[cfg(target_arch = "wasm32")]
    pub fn local_storage() -> Self {
        Self::new(crate::browser::LocalStorageStore)
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Current access token. An empty string counts as no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub fn access_token(&self) -> Result<Option<String>, StorageError> {
        let token = self.store.get(&self.keys.access_token)?;
        Ok(token.filter(|token| !token.is_empty()))
    }

    /// Store the access token obtained from a login
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write
    pub fn set_access_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(&self.keys.access_token, token)
    }

    /// Whether a token is present. Unreadable storage counts as signed out.
    pub fn is_authenticated(&self) -> bool {
        match self.access_token() {
            Ok(token) => token.is_some(),
            Err(error) => {
                tracing::warn!(%error, "Could not read access token, treating session as signed out");
                false
            }
        }
    }

    /// Cached user profile, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the entry does not deserialize
    pub fn user_info<T: DeserializeOwned>(&self) -> CoreResult<Option<T>> {
        match self.store.get(&self.keys.user_info)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Cache the user profile as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the store rejects the write
    pub fn set_user_info<T: Serialize>(&self, info: &T) -> CoreResult<()> {
        let raw = serde_json::to_string(info)?;
        self.store.set(&self.keys.user_info, &raw)?;
        Ok(())
    }

    /// Forget the token and the cached profile. Safe to call repeatedly.
    ///
    /// Both removals are attempted even if the first one fails; the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects either removal
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.store.remove(&self.keys.access_token);
        let profile = self.store.remove(&self.keys.user_info);
        token.and(profile)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
