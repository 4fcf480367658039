//! Product lifecycle contract for the supply chain ledger.
//!
//! This crate is the heart of the system. It provides:
//! - [`ProductLedger`], the adapter that turns typed record reads and writes
//!   into `get_state`/`put_state` calls on an injected [`WorldState`]
//! - [`SupplyChainContract`], the transactional lifecycle operations
//!   (seed, register, supply, wholesale, status change, lookup)
//! - [`Invocation`], name-based dispatch of string-argument calls onto those
//!   operations
//!
//! The contract holds no state of its own. Every operation receives the
//! world state as an argument, reads at most one record, applies its
//! transition and writes the whole record back. Atomicity across an
//! operation is the caller's job (see [`supplychain_state::Transaction`]).
//!
//! Status transitions are deliberately unvalidated: each operation sets its
//! target status whatever the current one is.
//!
//! [`WorldState`]: supplychain_state::WorldState

pub mod contract;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod seed;

#[cfg(test)]
mod testutil;

pub use contract::SupplyChainContract;
pub use dispatch::Invocation;
pub use error::{ContractError, ContractResult};
pub use ledger::{decode_record, encode_record, ProductLedger};
pub use seed::seed_records;

// Re-export key types
pub use supplychain_state::{StateError, WorldState};
pub use supplychain_types::{ProductRecord, ProductStatus};
