//! Valuation output models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::types::{CoercionWarning, SnapshotSource};

/// A line item with its computed stock value and low-stock flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValuedItem {
    #[serde(flatten)]
    pub item: LineItem,
    pub stock_value: Decimal,
    pub is_low_stock: bool,
}

/// Valuation of a filtered set of line items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    pub items: Vec<ValuedItem>,
    pub total_stock_value: Decimal,
    pub low_stock_count: usize,
}

/// Everything the inventory screen shows for one load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub source: SnapshotSource,
    /// Set when `source` is `Cached`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub valuation: ValuationReport,
    /// Categories of the unfiltered ledger, for the category picker
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CoercionWarning>,
}
