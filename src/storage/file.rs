//! JSON file storage.
//!
//! The whole map lives in one JSON object. Every write goes to a temporary
//! sibling file which is then renamed over the original, so a crash leaves
//! either the old map or the new one on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::KeyValueStorage;
use crate::error::AuthError;
use crate::Result;

type Entries = BTreeMap<String, String>;

/// Key-value store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Entries> {
        serde_json::from_slice(bytes).map_err(|e| {
            AuthError::Storage(format!(
                "corrupt storage file {}: {e}",
                self.path.display()
            ))
        })
    }

    async fn load(&self) -> Result<Entries> {
        match self.read_raw().await? {
            Some(bytes) => self.decode(&bytes),
            None => Ok(Entries::new()),
        }
    }

    async fn persist(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = entries.len(), "storage file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set_many(&self, batch: &[(&str, String)]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        for (key, value) in batch {
            entries.insert((*key).to_string(), value.clone());
        }
        self.persist(&entries).await
    }

    /// Removing from an unreadable file discards its contents, so a corrupt
    /// session can always be logged out of.
    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let Some(bytes) = self.read_raw().await? else {
            return Ok(());
        };
        let mut entries = match self.decode(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "discarding unreadable storage file");
                return self.persist(&Entries::new()).await;
            }
        };

        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.persist(&entries).await
    }
}
