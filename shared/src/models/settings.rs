//! Reconciliation settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

use super::DEFAULT_CATEGORY;

/// What happens to the scalar fields of an entry when a second record with
/// the same name is merged into it. Quantities are always summed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Price and category stay at the first-seen record's values
    #[default]
    KeepFirst,
    /// Price and category are overwritten by each later record
    LastWriteWins,
}

/// How a purchase's `totalAmount` becomes a unit price.
///
/// The billing API exposes only the invoice total on a purchase, and the
/// inventory screen has always shown it as the unit price. That inflates the
/// stock value of purchase-only items by a factor of the received quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchasePricing {
    /// Use the invoice total as-is (matches the inventory screen)
    #[default]
    InvoiceTotalAsUnitPrice,
    /// Divide the invoice total by the received quantity
    PerUnitFromInvoiceTotal,
}

/// Settings for one reconciliation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InventorySettings {
    /// Items at or below this quantity are flagged as low stock
    pub low_stock_threshold: Decimal,
    /// Category assigned to records without one
    pub default_category: String,
    pub merge_strategy: MergeStrategy,
    pub purchase_pricing: PurchasePricing,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: Decimal::from(10),
            default_category: DEFAULT_CATEGORY.to_string(),
            merge_strategy: MergeStrategy::default(),
            purchase_pricing: PurchasePricing::default(),
        }
    }
}

impl InventorySettings {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.low_stock_threshold.is_sign_negative() && !self.low_stock_threshold.is_zero() {
            return Err(InventoryError::InvalidSettings {
                field: "low_stock_threshold".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.default_category.trim().is_empty() {
            return Err(InventoryError::InvalidSettings {
                field: "default_category".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
