use thiserror::Error;

/// Errors produced by type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("product id must not be empty")]
    EmptyProductId,
}
