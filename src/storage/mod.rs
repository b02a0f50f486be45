//! Durable key-value storage.
//!
//! The storage layer only deals in raw strings. Encoding session data is the
//! session store's job, which keeps backends free of any knowledge about
//! profiles or tokens.

mod file;
mod memory;

use async_trait::async_trait;

use crate::Result;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Asynchronous string key-value store.
///
/// Batched writes and removals must apply all entries or none, so that
/// related keys never diverge.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`. Returns `None` if not found.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write every entry in a single step.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Remove every key in a single step. Missing keys are ignored.
    async fn remove_many(&self, keys: &[&str]) -> Result<()>;

    /// Write a single value.
    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_many(&[(key, value)]).await
    }

    /// Remove a single key.
    async fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key]).await
    }
}
