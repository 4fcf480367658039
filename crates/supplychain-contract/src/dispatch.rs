//! Name-based invocation of lifecycle operations.
//!
//! Ledger runtimes call a contract by function name with a list of string
//! arguments. [`Invocation::parse`] turns such a call into a typed
//! operation, checking arity and argument types up front so that a
//! malformed call never reaches the world state.

use supplychain_state::WorldState;
use supplychain_types::ProductRecord;

use crate::contract::SupplyChainContract;
use crate::error::{ContractError, ContractResult};

/// A parsed call to one of the contract's operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    SeedLedger,
    RegisterProduct {
        id: String,
        name: String,
        description: String,
        manufacturing_date: String,
        batch_number: String,
    },
    UpdateSupplyInfo {
        id: String,
        supply_date: String,
        location: String,
    },
    RecordWholesale {
        id: String,
        wholesale_date: String,
        location: String,
        quantity: i64,
    },
    ChangeProductStatus {
        id: String,
        new_status: String,
    },
    GetProductById {
        id: String,
    },
}

impl Invocation {
    /// Function names accepted by [`Invocation::parse`].
    pub const FUNCTIONS: [&'static str; 6] = [
        "SeedLedger",
        "RegisterProduct",
        "UpdateSupplyInfo",
        "RecordWholesale",
        "ChangeProductStatus",
        "GetProductByID",
    ];

    /// Parse a function name and its string arguments.
    pub fn parse<A: AsRef<str>>(function: &str, args: &[A]) -> ContractResult<Self> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let arity = |expected: usize| -> ContractResult<()> {
            if args.len() != expected {
                return Err(ContractError::InvalidArguments {
                    function: function.to_string(),
                    reason: format!("expected {expected} arguments, got {}", args.len()),
                });
            }
            Ok(())
        };

        let invocation = match function {
            "SeedLedger" => {
                arity(0)?;
                Self::SeedLedger
            }
            "RegisterProduct" => {
                arity(5)?;
                Self::RegisterProduct {
                    id: args[0].to_string(),
                    name: args[1].to_string(),
                    description: args[2].to_string(),
                    manufacturing_date: args[3].to_string(),
                    batch_number: args[4].to_string(),
                }
            }
            "UpdateSupplyInfo" => {
                arity(3)?;
                Self::UpdateSupplyInfo {
                    id: args[0].to_string(),
                    supply_date: args[1].to_string(),
                    location: args[2].to_string(),
                }
            }
            "RecordWholesale" => {
                arity(4)?;
                let quantity =
                    args[3]
                        .parse::<i64>()
                        .map_err(|e| ContractError::InvalidArguments {
                            function: function.to_string(),
                            reason: format!("quantity {:?} is not an integer: {e}", args[3]),
                        })?;
                Self::RecordWholesale {
                    id: args[0].to_string(),
                    wholesale_date: args[1].to_string(),
                    location: args[2].to_string(),
                    quantity,
                }
            }
            "ChangeProductStatus" => {
                arity(2)?;
                Self::ChangeProductStatus {
                    id: args[0].to_string(),
                    new_status: args[1].to_string(),
                }
            }
            "GetProductByID" => {
                arity(1)?;
                Self::GetProductById {
                    id: args[0].to_string(),
                }
            }
            other => return Err(ContractError::UnknownFunction(other.to_string())),
        };
        Ok(invocation)
    }

    /// The function name this invocation was parsed from.
    pub fn function(&self) -> &'static str {
        match self {
            Self::SeedLedger => "SeedLedger",
            Self::RegisterProduct { .. } => "RegisterProduct",
            Self::UpdateSupplyInfo { .. } => "UpdateSupplyInfo",
            Self::RecordWholesale { .. } => "RecordWholesale",
            Self::ChangeProductStatus { .. } => "ChangeProductStatus",
            Self::GetProductById { .. } => "GetProductByID",
        }
    }

    /// Returns `true` if executing this invocation never writes.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::GetProductById { .. })
    }

    /// Run the operation against `state`.
    ///
    /// Returns the record for `GetProductByID`, `None` for every other
    /// operation.
    pub fn execute<S: WorldState + ?Sized>(
        &self,
        contract: &SupplyChainContract,
        state: &S,
    ) -> ContractResult<Option<ProductRecord>> {
        match self {
            Self::SeedLedger => contract.seed_ledger(state)?,
            Self::RegisterProduct {
                id,
                name,
                description,
                manufacturing_date,
                batch_number,
            } => contract.register_product(
                state,
                id,
                name,
                description,
                manufacturing_date,
                batch_number,
            )?,
            Self::UpdateSupplyInfo {
                id,
                supply_date,
                location,
            } => contract.update_supply_info(state, id, supply_date, location)?,
            Self::RecordWholesale {
                id,
                wholesale_date,
                location,
                quantity,
            } => contract.record_wholesale(state, id, wholesale_date, location, *quantity)?,
            Self::ChangeProductStatus { id, new_status } => {
                contract.change_product_status(state, id, new_status)?
            }
            Self::GetProductById { id } => {
                return contract.get_product_by_id(state, id).map(Some);
            }
        }
        Ok(None)
    }
}

impl SupplyChainContract {
    /// Parse and execute a name-based call in one step.
    pub fn invoke<S: WorldState + ?Sized, A: AsRef<str>>(
        &self,
        state: &S,
        function: &str,
        args: &[A],
    ) -> ContractResult<Option<ProductRecord>> {
        Invocation::parse(function, args)?.execute(self, state)
    }
}
