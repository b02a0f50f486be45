//! In-process storage backed by a map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::KeyValueStorage;
use crate::error::AuthError;
use crate::Result;

/// Thread-safe in-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Get the number of stored keys.
    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|_| AuthError::LockPoisoned)?;
        Ok(entries.len())
    }

    /// Check whether the store holds no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Copy out the current contents.
    pub fn snapshot(&self) -> Result<HashMap<String, String>> {
        let entries = self.entries.read().map_err(|_| AuthError::LockPoisoned)?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| AuthError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set_many(&self, batch: &[(&str, String)]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| AuthError::LockPoisoned)?;
        for (key, value) in batch {
            entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| AuthError::LockPoisoned)?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
