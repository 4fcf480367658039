use supplychain_state::StateError;
use supplychain_types::TypeError;
use thiserror::Error;

/// Errors surfaced by lifecycle operations.
///
/// Every failure is returned to the caller as-is: the contract never
/// retries, substitutes a default, or continues after an error.
#[derive(Debug, Error)]
pub enum ContractError {
    /// No record is stored under the id.
    #[error("product with ID {id} not found")]
    NotFound { id: String },

    /// Stored bytes could not be parsed as a product record.
    #[error("error decoding product {id}: {reason}")]
    Decode { id: String, reason: String },

    /// The record could not be serialized.
    #[error("error encoding product {id}: {reason}")]
    Encode { id: String, reason: String },

    /// The world state failed to serve a read.
    #[error("error reading product {id} from ledger: {source}")]
    LedgerRead {
        id: String,
        #[source]
        source: StateError,
    },

    /// The world state failed to accept a write.
    #[error("error writing product {id} to ledger: {source}")]
    LedgerWrite {
        id: String,
        #[source]
        source: StateError,
    },

    #[error("invalid product id: {0}")]
    InvalidProductId(#[from] TypeError),

    #[error(
        "unknown function: {0} (expected one of {expected})",
        expected = crate::dispatch::Invocation::FUNCTIONS.join(", ")
    )]
    UnknownFunction(String),

    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },
}

impl ContractError {
    /// Returns `true` for [`ContractError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
