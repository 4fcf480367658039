//! Buffered transaction scope over a [`WorldState`].
//!
//! A [`Transaction`] collects every put in a private write set and serves
//! reads from that write set before falling through to the base state. The
//! write set reaches the base state only on [`commit`](Transaction::commit),
//! in a single `put_batch` call. Dropping the transaction without
//! committing discards every buffered write.
//!
//! ```
//! use supplychain_state::{InMemoryWorldState, Transaction, WorldState};
//!
//! let base = InMemoryWorldState::new();
//! let txn = Transaction::begin(&base);
//! txn.put_state("PRD001", b"v1").unwrap();
//! assert_eq!(txn.get_state("PRD001").unwrap(), Some(b"v1".to_vec()));
//! assert_eq!(base.get_state("PRD001").unwrap(), None);
//!
//! txn.commit().unwrap();
//! assert_eq!(base.get_state("PRD001").unwrap(), Some(b"v1".to_vec()));
//! ```

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{StateError, StateResult};
use crate::traits::WorldState;

/// An uncommitted unit of work against a base [`WorldState`].
pub struct Transaction<'a, S: WorldState + ?Sized> {
    base: &'a S,
    writes: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl<'a, S: WorldState + ?Sized> Transaction<'a, S> {
    /// Start a transaction with an empty write set.
    pub fn begin(base: &'a S) -> Self {
        Self {
            base,
            writes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Apply the write set to the base state and return how many keys were
    /// written. A transaction with no writes commits nothing.
    pub fn commit(self) -> StateResult<usize> {
        let writes = self
            .writes
            .into_inner()
            .map_err(|_| StateError::LockPoisoned)?;
        if writes.is_empty() {
            debug!("empty transaction, nothing to commit");
            return Ok(0);
        }

        let entries: Vec<(String, Vec<u8>)> = writes.into_iter().collect();
        self.base.put_batch(&entries)?;
        info!(keys = entries.len(), "transaction committed");
        Ok(entries.len())
    }

    /// Discard the write set, returning how many keys were dropped.
    pub fn rollback(self) -> StateResult<usize> {
        let writes = self
            .writes
            .into_inner()
            .map_err(|_| StateError::LockPoisoned)?;
        debug!(keys = writes.len(), "transaction rolled back");
        Ok(writes.len())
    }
}

impl<S: WorldState + ?Sized> WorldState for Transaction<'_, S> {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        {
            let writes = self.writes.read().map_err(|_| StateError::LockPoisoned)?;
            if let Some(value) = writes.get(key) {
                return Ok(Some(value.clone()));
            }
        }
        self.base.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if key.is_empty() {
            return Err(StateError::EmptyKey);
        }
        let mut writes = self.writes.write().map_err(|_| StateError::LockPoisoned)?;
        writes.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

impl<S: WorldState + ?Sized> std::fmt::Debug for Transaction<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.writes.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("Transaction")
            .field("pending_writes", &pending)
            .finish()
    }
}
