//! World state storage for the supply chain ledger.
//!
//! The lifecycle contract never owns its storage. It is handed a
//! [`WorldState`] on every call and reads or writes whole values through two
//! primitives, `get_state` and `put_state`. This crate defines that seam and
//! the backends a host can plug into it.
//!
//! # Backends
//!
//! - [`InMemoryWorldState`] -- `BTreeMap`-based state for tests and embedding
//! - [`FileWorldState`] -- single JSON snapshot file, one current value per key
//! - [`Transaction`] -- buffered write set over any other backend, committed
//!   all-or-nothing
//!
//! # Design Rules
//!
//! 1. A put always replaces the whole value; there is no merge.
//! 2. Only the current value per key is kept. No history, no versions.
//! 3. Empty keys are rejected by every backend.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod txn;

pub use error::{StateError, StateResult};
pub use file::FileWorldState;
pub use memory::InMemoryWorldState;
pub use traits::WorldState;
pub use txn::Transaction;
