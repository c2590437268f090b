//! Key-value settings storage.
//!
//! All persisted options go through [`SettingsStore`]. The favorites list
//! is one value in this store; swapping the backing implementation does
//! not touch any call site.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Persistent key-value settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Return the stored value for `key`, or `default` when absent.
    /// Never fails: a store that cannot be read behaves as empty.
    async fn get(&self, key: &str, default: Value) -> Value;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Settings stored as a single JSON object in one file.
///
/// The whole map is kept in memory and rewritten on every `set`. Admin
/// settings are small and written by a single actor, so a whole-file
/// overwrite is one scalar write with no partial states to reason about.
pub struct JsonFileSettings {
    path: PathBuf,
    entries: parking_lot::RwLock<BTreeMap<String, Value>>,
}

impl JsonFileSettings {
    /// Open the settings file, creating an empty store when it is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("invalid settings file: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read settings file: {}", path.display()));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: parking_lot::RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettings {
    async fn get(&self, key: &str, default: Value) -> Value {
        self.entries.read().get(key).cloned().unwrap_or(default)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        // Serialize under the lock, write after releasing it.
        let serialized = {
            let mut entries = self.entries.write();
            entries.insert(key.to_string(), value);
            serde_json::to_string_pretty(&*entries).context("failed to serialize settings")?
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create settings dir: {}", parent.display()))?;
        }

        tokio::fs::write(&self.path, serialized)
            .await
            .with_context(|| format!("failed to write settings file: {}", self.path.display()))
    }
}
