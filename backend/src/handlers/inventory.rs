//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::BearerToken;
use crate::models::{CategoriesResponse, InventoryQuery, InventoryView};
use crate::AppState;

/// Reconciled, filtered and valued inventory of a company
pub async fn get_inventory(
    State(state): State<AppState>,
    token: BearerToken,
    Path(company_id): Path<String>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<InventoryView>> {
    query.validate()?;
    let view = state
        .inventory
        .inventory_view(&company_id, token.as_str(), &query.into())
        .await?;
    Ok(Json(view))
}

/// Categories present in a company's inventory
pub async fn get_categories(
    State(state): State<AppState>,
    token: BearerToken,
    Path(company_id): Path<String>,
) -> AppResult<Json<CategoriesResponse>> {
    let categories = state
        .inventory
        .categories(&company_id, token.as_str())
        .await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Items at or below the low-stock threshold
pub async fn get_low_stock(
    State(state): State<AppState>,
    token: BearerToken,
    Path(company_id): Path<String>,
) -> AppResult<Json<InventoryView>> {
    let view = state
        .inventory
        .low_stock(&company_id, token.as_str())
        .await?;
    Ok(Json(view))
}
