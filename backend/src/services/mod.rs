//! Business logic services for the inventory gateway

pub mod cache;
pub mod inventory;

pub use cache::{CacheRepository, FileCacheRepository, InMemoryCacheRepository};
pub use inventory::InventoryService;
