//! External API integrations

pub mod billing_api;

pub use billing_api::{BillingApiClient, InventorySource};
