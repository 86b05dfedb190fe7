// ============================================================================
// Worklogz Infrastructure - File Key-Value Store
// File: crates/worklogz-infrastructure/src/kv/file_store.rs
// ============================================================================
//! Durable [`KeyValueStore`] backed by one JSON object on disk.
//!
//! Entries are held in memory and the whole file is rewritten on every
//! `set` (temp file + rename).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use worklogz_core::error::DomainError;
use worklogz_core::repositories::KeyValueStore;

pub struct FileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens `path`, creating nothing until the first write. An unreadable
    /// JSON document starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Cache file {} is corrupt, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::StorageError(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        info!("Local cache file {} opened ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let storage_error =
            |e: std::io::Error| DomainError::StorageError(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(storage_error)?;
        fs::rename(&tmp, &self.path).map_err(storage_error)?;

        debug!("Local cache file {} written", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}
