use crate::error::StateResult;

/// Key-value world state exposed by the ledger runtime.
///
/// All implementations must satisfy these invariants:
/// - `get_state` after `put_state` on the same key returns the written bytes
///   (read-your-writes).
/// - `put_state` replaces the previous value entirely. Last write wins.
/// - The empty key is rejected with [`StateError::EmptyKey`](crate::StateError::EmptyKey).
/// - All I/O errors are propagated, never silently ignored.
pub trait WorldState: Send + Sync {
    /// Read the current value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has no value.
    /// Returns `Err` on backend failure.
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()>;

    /// Write several entries.
    ///
    /// Default implementation calls `put_state()` for each entry and stops at
    /// the first failure, leaving earlier entries written. Backends may
    /// override to apply the whole batch at once.
    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StateResult<()> {
        entries
            .iter()
            .try_for_each(|(key, value)| self.put_state(key, value))
    }
}
