//! Raw records as returned by the remote billing API
//!
//! Numeric fields are kept as [`serde_json::Value`] because the API hands back
//! whatever the entry form submitted. Unknown fields (gst, status, vendor
//! details, ...) are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product master record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default, rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

/// A purchase (goods received) record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    #[serde(default)]
    pub id: Value,
    /// Name of the purchased product; matches `ProductRecord::name`
    #[serde(default, rename = "productname")]
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Quantity received. The field name is misspelled upstream.
    #[serde(default, rename = "stockrecieved")]
    pub stock_received: Value,
    /// Invoice total for the purchase
    #[serde(default, rename = "totalAmount")]
    pub total_amount: Value,
    #[serde(default, rename = "orderdate")]
    pub order_date: Option<String>,
}

/// Envelope wrapping every list response of the billing API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ApiEnvelope<T> {
    /// Records of a successful response; a failed envelope counts as empty
    pub fn into_records(self) -> Vec<T> {
        if self.success {
            self.data
        } else {
            Vec::new()
        }
    }
}
