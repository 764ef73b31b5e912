//! Shared inventory reconciliation core
//!
//! This crate merges the product and purchase collections of the billing API
//! into one stock ledger and values it. It is used by the backend gateway and,
//! via WASM, by the browser client.

pub mod error;
pub mod models;
pub mod reconcile;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use reconcile::*;
pub use types::*;
pub use validation::*;
