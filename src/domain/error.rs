//! Error taxonomy for inventory operations.

use crate::storage::StoreError;
use thiserror::Error;

/// Outcome of a failed inventory operation, as seen by callers of the service layer.
///
/// Audit write failures never appear here: they are logged and swallowed by the
/// audit log writer and never reach a caller.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Rejected before any side effect (negative price/stock, missing required fields).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Unknown product id or barcode. A normal outcome, not a fault.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The store failed on a read or on the primary write.
    #[error("Persistence error: {0}")]
    Persistence(#[source] StoreError),
}

impl InventoryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        InventoryError::InvalidArgument(message.into())
    }

    pub fn product_not_found(id: impl std::fmt::Display) -> Self {
        InventoryError::NotFound(format!("product {}", id))
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => InventoryError::InvalidArgument(message),
            other => InventoryError::Persistence(other),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
