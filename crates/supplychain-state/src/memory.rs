use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StateError, StateResult};
use crate::traits::WorldState;

/// In-memory, `BTreeMap`-based world state.
///
/// Intended for tests and embedding. Values are held behind a `RwLock` for
/// safe concurrent access and cloned on read/write. Data is lost when the
/// state is dropped.
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryWorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently holding a value.
    pub fn len(&self) -> StateResult<usize> {
        Ok(self.entries.read().map_err(|_| StateError::LockPoisoned)?.len())
    }

    /// Returns `true` if no key holds a value.
    pub fn is_empty(&self) -> StateResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> StateResult<Vec<String>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.keys().cloned().collect())
    }

    /// Copy of every key/value pair, in key order.
    pub fn snapshot(&self) -> StateResult<BTreeMap<String, Vec<u8>>> {
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.clone())
    }

    /// Remove every entry.
    pub fn clear(&self) -> StateResult<()> {
        self.entries
            .write()
            .map_err(|_| StateError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState for InMemoryWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let map = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let mut map = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StateResult<()> {
        if entries.iter().any(|(key, _)| key.is_empty()) {
            return Err(StateError::EmptyKey);
        }
        // One write lock for the whole batch: readers see all or nothing.
        let mut map = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("InMemoryWorldState")
            .field("key_count", &count)
            .finish()
    }
}
