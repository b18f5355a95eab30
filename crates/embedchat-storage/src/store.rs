//! Per-agent conversation key/value store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use embedchat_common::{PersistenceMode, StorageError};
use tracing::{debug, warn};

use crate::durable::DurableStore;

/// Prefix of every durable namespace.
pub const STORAGE_PREFIX: &str = "embedchat_store";

/// Store handle shared between the bridge and the session. Access is
/// serialized by the mutex; one writer per agent token is assumed.
pub type SharedStore = Arc<Mutex<KeyValueStore>>;

/// Durable namespace for an agent token: `"{prefix}_{token}"`.
pub fn storage_namespace(token: &str) -> String {
    format!("{STORAGE_PREFIX}_{token}")
}

/// Conversation key/value state for one agent.
///
/// In [`PersistenceMode::Disk`] the in-memory map is authoritative and every
/// mutation is flushed to the durable store straight away. Durable failures
/// are logged and the store carries on in memory.
pub struct KeyValueStore {
    mode: PersistenceMode,
    namespace: String,
    entries: BTreeMap<String, String>,
    durable: Option<Arc<dyn DurableStore>>,
}

impl KeyValueStore {
    /// Create the store for `token`. Disk mode loads the durable namespace
    /// once; it fails only when no durable store was supplied.
    pub fn new(
        mode: PersistenceMode,
        token: &str,
        durable: Option<Arc<dyn DurableStore>>,
    ) -> Result<Self, StorageError> {
        let namespace = storage_namespace(token);
        let durable = match mode {
            PersistenceMode::Disk => Some(durable.ok_or(StorageError::MissingDurableStore)?),
            PersistenceMode::None | PersistenceMode::Memory => None,
        };

        let entries = match &durable {
            Some(store) => store.load(&namespace).unwrap_or_else(|e| {
                warn!(namespace = %namespace, error = %e, "durable store unavailable, starting empty");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };

        debug!(namespace = %namespace, ?mode, loaded = entries.len(), "key/value store ready");
        Ok(Self {
            mode,
            namespace,
            entries,
            durable,
        })
    }

    /// Wrap the store for sharing with the bridge.
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.mode == PersistenceMode::None {
            return None;
        }
        self.entries.get(key).cloned()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.mode == PersistenceMode::None {
            return;
        }
        self.entries.insert(key.into(), value.into());
        self.flush();
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        if self.mode == PersistenceMode::None {
            return None;
        }
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.flush();
        }
        removed
    }

    /// Empty the in-memory map and the durable namespace.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(store) = &self.durable {
            if let Err(e) = store.clear(&self.namespace) {
                warn!(namespace = %self.namespace, error = %e, "failed to clear durable store");
            }
        }
    }

    pub fn get_all(&self) -> BTreeMap<String, String> {
        if self.mode == PersistenceMode::None {
            return BTreeMap::new();
        }
        self.entries.clone()
    }

    /// Replace every entry, for example from a saved session snapshot.
    pub fn replace_all(&mut self, entries: BTreeMap<String, String>) {
        if self.mode == PersistenceMode::None {
            return;
        }
        self.entries = entries;
        self.flush();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) {
        let Some(store) = &self.durable else {
            return;
        };
        if let Err(e) = store.save(&self.namespace, &self.entries) {
            warn!(namespace = %self.namespace, error = %e, "durable write failed, keeping value in memory");
        }
    }
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Values may be secrets; only report the shape.
        f.debug_struct("KeyValueStore")
            .field("mode", &self.mode)
            .field("namespace", &self.namespace)
            .field("entries", &self.entries.len())
            .field("durable", &self.durable.is_some())
            .finish()
    }
}
