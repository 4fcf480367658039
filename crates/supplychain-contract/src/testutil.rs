//! World state doubles for failure-path tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use supplychain_state::{InMemoryWorldState, StateError, StateResult, WorldState};

/// In-memory state that can be told to fail reads, or to fail every write
/// after a number of successful ones.
pub struct FlakyState {
    pub inner: InMemoryWorldState,
    fail_reads: bool,
    writes_allowed: Option<usize>,
    writes_done: AtomicUsize,
}

impl FlakyState {
    pub fn failing_reads() -> Self {
        Self {
            inner: InMemoryWorldState::new(),
            fail_reads: true,
            writes_allowed: None,
            writes_done: AtomicUsize::new(0),
        }
    }

    pub fn failing_writes_after(allowed: usize) -> Self {
        Self {
            inner: InMemoryWorldState::new(),
            fail_reads: false,
            writes_allowed: Some(allowed),
            writes_done: AtomicUsize::new(0),
        }
    }
}

impl WorldState for FlakyState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(StateError::Unavailable("read refused".into()));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if let Some(allowed) = self.writes_allowed {
            if self.writes_done.load(Ordering::SeqCst) >= allowed {
                return Err(StateError::Unavailable("write refused".into()));
            }
        }
        self.inner.put_state(key, value)?;
        self.writes_done.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
