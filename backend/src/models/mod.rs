//! Request and response models for the inventory gateway
//!
//! Re-exports models from the shared crate and adds backend-specific models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub use shared::models::*;
use shared::{validate_filter_date, InventoryFilter};

/// Query string of the inventory endpoints
#[derive(Debug, Default, Deserialize, Validate)]
pub struct InventoryQuery {
    pub category: Option<String>,
    #[serde(alias = "searchText")]
    pub search: Option<String>,
    #[validate(custom = "validate_date_param")]
    pub start_date: Option<String>,
    #[validate(custom = "validate_date_param")]
    pub end_date: Option<String>,
}

fn validate_date_param(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_filter_date(value).map_err(|message| {
        let mut error = ValidationError::new("iso_date");
        error.message = Some(message.into());
        error
    })
}

impl From<InventoryQuery> for InventoryFilter {
    fn from(query: InventoryQuery) -> Self {
        InventoryFilter {
            category: query.category,
            search_text: query.search,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

/// Response of the categories endpoint
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}
