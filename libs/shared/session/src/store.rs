use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(String),
}

/// Key/value storage backing a [`crate::SessionContext`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;

    async fn remove_items(&self, keys: &[&str]) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), SessionError> {
        let mut items = self.items.write().await;
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// Stores the session as a flat JSON object on disk. A missing file is an
/// empty session.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| SessionError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    // Writes start over from an empty map when the file cannot be parsed,
    // so login and logout still work on a damaged session file.
    async fn load_for_write(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match self.load().await {
            Err(SessionError::Corrupt(reason)) => {
                warn!("Discarding corrupt session file {}: {}", self.path.display(), reason);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn save(&self, items: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let raw = serde_json::to_string_pretty(items)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, raw).await?;

        debug!("Session written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.write().await;
        let mut items = self.load_for_write().await?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), SessionError> {
        let _guard = self.lock.write().await;
        let mut items = self.load_for_write().await?;
        for key in keys {
            items.remove(*key);
        }
        self.save(&items).await
    }
}
