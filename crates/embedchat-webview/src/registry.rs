use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use embedchat_common::SessionId;
use tracing::debug;

/// Keeps per-session objects alive while their display unit is torn down
/// and recreated.
///
/// The first value stored under an id wins. Later lookups read through to
/// it, even when the caller offers a fresh replacement.
pub struct SessionRegistry<T: ?Sized> {
    entries: Mutex<HashMap<SessionId, Arc<T>>>,
}

impl<T: ?Sized> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: ?Sized> SessionRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Arc<T>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the registered value, or register the one `make` builds.
    pub fn get_or_insert_with(&self, id: &SessionId, make: impl FnOnce() -> Arc<T>) -> Arc<T> {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(id) {
            debug!(session = %id, "registry hit");
            return Arc::clone(existing);
        }
        let value = make();
        entries.insert(id.clone(), Arc::clone(&value));
        debug!(session = %id, "registered session");
        value
    }

    pub fn get(&self, id: &SessionId) -> Option<Arc<T>> {
        self.lock().get(id).cloned()
    }

    /// Forget a session, e.g. when its screen is finished for good.
    pub fn remove(&self, id: &SessionId) -> Option<Arc<T>> {
        let removed = self.lock().remove(id);
        if removed.is_some() {
            debug!(session = %id, "session released");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
