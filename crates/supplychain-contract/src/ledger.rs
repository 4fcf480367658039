//! Typed access to product records in the world state.

use supplychain_state::WorldState;
use supplychain_types::ProductRecord;
use tracing::debug;

use crate::error::{ContractError, ContractResult};

/// Serialize a record to its ledger representation (JSON, camelCase fields).
pub fn encode_record(record: &ProductRecord) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| ContractError::Encode {
        id: record.product_id.clone(),
        reason: e.to_string(),
    })
}

/// Parse ledger bytes stored under `id` back into a record.
pub fn decode_record(id: &str, bytes: &[u8]) -> ContractResult<ProductRecord> {
    serde_json::from_slice(bytes).map_err(|e| ContractError::Decode {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Adapter between typed records and the raw `get_state`/`put_state`
/// primitives.
///
/// Borrowed per call; never caches a record between operations.
pub struct ProductLedger<'a, S: WorldState + ?Sized> {
    state: &'a S,
}

impl<'a, S: WorldState + ?Sized> ProductLedger<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Read the record stored under `id`.
    ///
    /// Fails with `NotFound` if the key holds no value, `Decode` if the bytes
    /// are not a record, and `LedgerRead` if the world state itself fails.
    pub fn fetch(&self, id: &str) -> ContractResult<ProductRecord> {
        let bytes = self
            .state
            .get_state(id)
            .map_err(|source| ContractError::LedgerRead {
                id: id.to_string(),
                source,
            })?
            .ok_or_else(|| ContractError::NotFound { id: id.to_string() })?;
        decode_record(id, &bytes)
    }

    /// Write `record` under its own `product_id`, replacing whatever was
    /// there.
    pub fn store(&self, record: &ProductRecord) -> ContractResult<()> {
        let bytes = encode_record(record)?;
        self.state
            .put_state(&record.product_id, &bytes)
            .map_err(|source| ContractError::LedgerWrite {
                id: record.product_id.clone(),
                source,
            })?;
        debug!(
            id = %record.product_id,
            status = %record.status,
            len = bytes.len(),
            "record stored"
        );
        Ok(())
    }
}
