//! Foundation types for the supply chain ledger.
//!
//! This crate provides the data model stored in the world state: one
//! [`ProductRecord`] per product identifier, carrying a free-form
//! [`ProductStatus`] label. Every other crate in the workspace depends on
//! `supplychain-types`.
//!
//! # Key Types
//!
//! - [`ProductRecord`] — The full record stored under a product's id
//! - [`ProductStatus`] — Lifecycle label (four suggested values plus any custom label)
//! - [`TypeError`] — Validation failures for caller-supplied values

pub mod error;
pub mod record;
pub mod status;

pub use error::TypeError;
pub use record::{validate_product_id, ProductRecord};
pub use status::ProductStatus;
