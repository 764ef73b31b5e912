//! Canonical stock line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default category for records that carry none
pub const DEFAULT_CATEGORY: &str = "General";

/// Prefix that keeps purchase ids apart from product ids
pub const PURCHASE_ID_PREFIX: &str = "purchase-";

/// One row of the reconciled stock ledger.
///
/// Line items are rebuilt from the product and purchase collections on every
/// load. The serialized shape is also the offline cache format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    /// Deduplication key, compared case-sensitively
    pub name: String,
    pub category: String,
    pub available_quantity: Decimal,
    pub unit_price: Decimal,
    /// `YYYY-MM-DD`
    pub last_updated_date: String,
    pub low_stock_threshold: Decimal,
}

impl LineItem {
    /// Quantity x unit price, clamped to `Decimal::MAX` when the product
    /// does not fit
    pub fn stock_value(&self) -> Decimal {
        self.available_quantity.saturating_mul(self.unit_price)
    }

    pub fn is_low_stock(&self) -> bool {
        self.available_quantity <= self.low_stock_threshold
    }

    pub fn is_purchase_derived(&self) -> bool {
        self.id.starts_with(PURCHASE_ID_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, price: i64) -> LineItem {
        LineItem {
            id: "1".to_string(),
            name: "Pen".to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            available_quantity: Decimal::from(qty),
            unit_price: Decimal::from(price),
            last_updated_date: "2024-01-01".to_string(),
            low_stock_threshold: Decimal::from(10),
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(item(10, 1).is_low_stock());
        assert!(item(0, 1).is_low_stock());
        assert!(!item(11, 1).is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(item(8, 10).stock_value(), Decimal::from(80));
    }

    #[test]
    fn test_stock_value_saturates() {
        let mut huge = item(0, 0);
        huge.available_quantity = Decimal::from_scientific("1e20").unwrap();
        huge.unit_price = Decimal::from_scientific("1e20").unwrap();
        assert_eq!(huge.stock_value(), Decimal::MAX);
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(item(1, 2)).unwrap();
        assert!(json.get("availableQuantity").is_some());
        assert!(json.get("lastUpdatedDate").is_some());
        assert!(json.get("lowStockThreshold").is_some());
    }
}
