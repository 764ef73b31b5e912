//! Filter engine for the merged ledger

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};
use crate::models::LineItem;
use crate::validation::is_iso_date;

/// Filter criteria; every field is optional and an empty string counts as
/// unset. All set criteria must hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of the item name
    #[serde(alias = "search")]
    pub search_text: Option<String>,
    /// Inclusive lower bound on `last_updated_date`
    pub start_date: Option<String>,
    /// Inclusive upper bound on `last_updated_date`
    pub end_date: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl InventoryFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.category).is_none()
            && non_empty(&self.search_text).is_none()
            && non_empty(&self.start_date).is_none()
            && non_empty(&self.end_date).is_none()
    }

    /// Reject date bounds that are not `YYYY-MM-DD`.
    ///
    /// Filtering itself compares dates as strings and never fails; this is
    /// for callers that take bounds from user input.
    pub fn validate(&self) -> InventoryResult<()> {
        for (field, value) in [("start_date", &self.start_date), ("end_date", &self.end_date)] {
            if let Some(v) = non_empty(value) {
                if !is_iso_date(v) {
                    return Err(InventoryError::InvalidDate {
                        field: field.to_string(),
                        value: v.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn matches(&self, item: &LineItem) -> bool {
        if let Some(category) = non_empty(&self.category) {
            if item.category != category {
                return false;
            }
        }

        if let Some(search) = non_empty(&self.search_text) {
            if !item.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        // YYYY-MM-DD sorts lexicographically in date order
        if let Some(start) = non_empty(&self.start_date) {
            if item.last_updated_date.as_str() < start {
                return false;
            }
        }

        if let Some(end) = non_empty(&self.end_date) {
            if item.last_updated_date.as_str() > end {
                return false;
            }
        }

        true
    }

    /// Items satisfying every set criterion, in ledger order
    pub fn apply<'a>(&self, items: &'a [LineItem]) -> Vec<&'a LineItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
