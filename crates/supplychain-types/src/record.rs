use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::status::ProductStatus;

/// The value stored in the world state under a product's id.
///
/// The record is always written whole: there is no partial-update protocol,
/// and no field is cross-checked against `status`. A record with status
/// `In Supply` and an empty `supply_date` is valid.
///
/// Wire field names are the camelCase names of the ledger format
/// (`productID`, `manufacturingDate`, ...). Every descriptive field defaults
/// to empty/zero when missing from stored bytes; only `productID` and
/// `status` must be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Ledger key. Chosen by the caller and used verbatim.
    #[serde(rename = "productID")]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Caller-supplied date string, not validated.
    #[serde(default)]
    pub manufacturing_date: String,
    #[serde(default)]
    pub batch_number: String,
    pub status: ProductStatus,
    #[serde(default)]
    pub supply_date: String,
    #[serde(default)]
    pub warehouse_location: String,
    #[serde(default)]
    pub wholesale_date: String,
    #[serde(default)]
    pub wholesale_location: String,
    /// Signed and unbounded; negative values are stored as given.
    #[serde(default)]
    pub quantity: i64,
}

impl ProductRecord {
    fn with_status(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        manufacturing_date: impl Into<String>,
        batch_number: impl Into<String>,
        status: ProductStatus,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            description: description.into(),
            manufacturing_date: manufacturing_date.into(),
            batch_number: batch_number.into(),
            status,
            supply_date: String::new(),
            warehouse_location: String::new(),
            wholesale_date: String::new(),
            wholesale_location: String::new(),
            quantity: 0,
        }
    }

    /// A freshly registered record: status `Registered`, no supply or
    /// wholesale details.
    pub fn registered(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        manufacturing_date: impl Into<String>,
        batch_number: impl Into<String>,
    ) -> Self {
        Self::with_status(
            product_id,
            name,
            description,
            manufacturing_date,
            batch_number,
            ProductStatus::Registered,
        )
    }

    /// A record fresh off the production line: status `Manufactured`.
    pub fn manufactured(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        manufacturing_date: impl Into<String>,
        batch_number: impl Into<String>,
    ) -> Self {
        Self::with_status(
            product_id,
            name,
            description,
            manufacturing_date,
            batch_number,
            ProductStatus::Manufactured,
        )
    }

    /// Record the move into a warehouse. Overwrites status unconditionally.
    pub fn apply_supply(&mut self, supply_date: impl Into<String>, location: impl Into<String>) {
        self.supply_date = supply_date.into();
        self.warehouse_location = location.into();
        self.status = ProductStatus::InSupply;
    }

    /// Record a completed wholesale. Overwrites status unconditionally.
    pub fn apply_wholesale(
        &mut self,
        wholesale_date: impl Into<String>,
        location: impl Into<String>,
        quantity: i64,
    ) {
        self.wholesale_date = wholesale_date.into();
        self.wholesale_location = location.into();
        self.quantity = quantity;
        self.status = ProductStatus::WholesaleCompleted;
    }
}

/// Validate a caller-supplied product id.
///
/// The id is the ledger key, so the only requirement is that it be
/// non-empty. Whitespace and any other characters are accepted verbatim.
pub fn validate_product_id(id: &str) -> Result<(), TypeError> {
    if id.is_empty() {
        return Err(TypeError::EmptyProductId);
    }
    Ok(())
}
