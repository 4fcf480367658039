use supplychain_state::WorldState;
use supplychain_types::{validate_product_id, ProductRecord, ProductStatus};
use tracing::{debug, info};

use crate::error::ContractResult;
use crate::ledger::ProductLedger;
use crate::seed::seed_records;

/// Lifecycle operations on product records.
///
/// Each method is one atomic unit of work from the caller's point of view:
/// it reads at most one record, applies a single transition, and writes the
/// complete record back. A failed read aborts before anything is written.
/// The world state is passed in on every call and never retained.
#[derive(Clone, Copy, Debug, Default)]
pub struct SupplyChainContract;

impl SupplyChainContract {
    pub fn new() -> Self {
        Self
    }

    /// Write the two fixed `Manufactured` seed records, overwriting any
    /// existing values.
    ///
    /// The records are written one after the other. If the second write
    /// fails the first stays written at this layer; run inside a
    /// [`Transaction`](supplychain_state::Transaction) for all-or-nothing.
    pub fn seed_ledger<S: WorldState + ?Sized>(&self, state: &S) -> ContractResult<()> {
        let ledger = ProductLedger::new(state);
        let records = seed_records();
        for record in &records {
            ledger.store(record)?;
        }
        info!(count = records.len(), "ledger seeded");
        Ok(())
    }

    /// Create a `Registered` record for `id`.
    ///
    /// No existence check: an existing record under the same id is replaced
    /// entirely, including any supply or wholesale details.
    pub fn register_product<S: WorldState + ?Sized>(
        &self,
        state: &S,
        id: &str,
        name: &str,
        description: &str,
        manufacturing_date: &str,
        batch_number: &str,
    ) -> ContractResult<()> {
        validate_product_id(id)?;
        let record =
            ProductRecord::registered(id, name, description, manufacturing_date, batch_number);
        ProductLedger::new(state).store(&record)?;
        debug!(id, "product registered");
        Ok(())
    }

    /// Record warehouse details and move the product to `In Supply`,
    /// whatever its current status.
    pub fn update_supply_info<S: WorldState + ?Sized>(
        &self,
        state: &S,
        id: &str,
        supply_date: &str,
        location: &str,
    ) -> ContractResult<()> {
        validate_product_id(id)?;
        let ledger = ProductLedger::new(state);
        let mut record = ledger.fetch(id)?;
        let previous = record.status.clone();
        record.apply_supply(supply_date, location);
        ledger.store(&record)?;
        debug!(id, from = %previous, to = %record.status, "supply info updated");
        Ok(())
    }

    /// Record wholesale details and move the product to
    /// `Wholesale Completed`, whatever its current status.
    ///
    /// `quantity` is stored as given, negative values included.
    pub fn record_wholesale<S: WorldState + ?Sized>(
        &self,
        state: &S,
        id: &str,
        wholesale_date: &str,
        location: &str,
        quantity: i64,
    ) -> ContractResult<()> {
        validate_product_id(id)?;
        let ledger = ProductLedger::new(state);
        let mut record = ledger.fetch(id)?;
        let previous = record.status.clone();
        record.apply_wholesale(wholesale_date, location, quantity);
        ledger.store(&record)?;
        debug!(id, from = %previous, to = %record.status, quantity, "wholesale recorded");
        Ok(())
    }

    /// Overwrite only the status label. Any string is accepted.
    pub fn change_product_status<S: WorldState + ?Sized>(
        &self,
        state: &S,
        id: &str,
        new_status: &str,
    ) -> ContractResult<()> {
        validate_product_id(id)?;
        let ledger = ProductLedger::new(state);
        let mut record = ledger.fetch(id)?;
        let previous = std::mem::replace(&mut record.status, ProductStatus::from(new_status));
        ledger.store(&record)?;
        debug!(id, from = %previous, to = %record.status, "status changed");
        Ok(())
    }

    /// Read the record stored under `id`. No side effects.
    pub fn get_product_by_id<S: WorldState + ?Sized>(
        &self,
        state: &S,
        id: &str,
    ) -> ContractResult<ProductRecord> {
        validate_product_id(id)?;
        ProductLedger::new(state).fetch(id)
    }
}
