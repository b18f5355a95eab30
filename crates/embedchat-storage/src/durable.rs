//! Durable backing for disk-mode stores.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use embedchat_common::StorageError;
use tracing::debug;

/// A durable namespace-to-map store. One namespace per agent token.
///
/// Implementations must be cheap enough to call on every write; the key
/// value footprint of a conversation is small.
pub trait DurableStore: Send + Sync {
    /// Read every entry of a namespace. A namespace never written is empty.
    fn load(&self, namespace: &str) -> Result<BTreeMap<String, String>, StorageError>;

    /// Replace the contents of a namespace.
    fn save(&self, namespace: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError>;

    /// Drop a namespace entirely.
    fn clear(&self, namespace: &str) -> Result<(), StorageError>;
}

/// Stores each namespace as a JSON object in `{root}/{namespace}.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A store rooted at the platform data directory.
    pub fn default_location() -> Result<Self, StorageError> {
        Ok(Self::new(crate::paths::store_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        let file_name: String = namespace
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file_name}.json"))
    }
}

impl DurableStore for FileStore {
    fn load(&self, namespace: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let path = self.path_for(namespace);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("{}: {e}", path.display())))
    }

    fn save(&self, namespace: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(namespace);
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!(namespace, entries = entries.len(), "store flushed");
        Ok(())
    }

    fn clear(&self, namespace: &str) -> Result<(), StorageError> {
        let path = self.path_for(namespace);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
