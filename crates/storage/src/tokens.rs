//! Token storage capability
//!
//! The login flow writes session tokens through an injected [`TokenStore`]
//! rather than a global defaults object, so tests can observe writes without
//! a device. Keys are fixed strings matching the original client.

use crate::kv::{KvError, KvStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

/// Storage key for the backend access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key for the backend refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Token storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key-value store error
    #[error("Key-value error: {0}")]
    Kv(#[from] KvError),
}

/// Result type for token storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Injected string key-value capability for session tokens
pub trait TokenStore: Send + Sync {
    /// Read a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under a key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;
}

/// Sled-backed token store
#[derive(Debug, Clone)]
pub struct SledTokenStore {
    kv: KvStore,
}

impl SledTokenStore {
    /// Create a token store over an existing key-value store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

impl TokenStore for SledTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv.get(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.kv.set(key, &value.to_string())?)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.kv.remove(key)?)
    }
}

/// In-memory token store for deterministic tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.values.lock().remove(key).is_some())
    }
}
