//! Errors raised by the inventory core
//!
//! Malformed source data never ends up here; it is recovered as a
//! [`crate::CoercionWarning`]. Only caller mistakes do.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Invalid settings: {field}: {message}")]
    InvalidSettings { field: String, message: String },

    #[error("Invalid date for {field}: expected YYYY-MM-DD, got {value:?}")]
    InvalidDate { field: String, value: String },
}

pub type InventoryResult<T> = Result<T, InventoryError>;
