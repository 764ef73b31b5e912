//! HTTP request handlers

pub mod health;
pub mod inventory;

pub use health::health_check;
pub use inventory::{get_categories, get_inventory, get_low_stock};
