//! # Inventory Routes
//!
//! CRUD over raw-material inventory plus stock adjustments and the
//! screen-summary figures.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use salespro_core::stats::{inventory_summary, InventorySummary};
use salespro_core::validation::{
    validate_item_name, validate_price_cents, validate_sku, validate_stock_level,
};
use salespro_core::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use salespro_db::workflow;

use crate::error::ApiError;
use crate::routes::catalog::StockAdjustment;
use crate::routes::ListResponse;
use crate::state::AppState;

/// GET /api/inventory
pub async fn list(State(state): State<AppState>) -> Json<ListResponse<InventoryItem>> {
    Json(ListResponse::from_result(state.db.inventory().list().await))
}

/// GET /api/inventory/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<InventorySummary>, ApiError> {
    let items = state.db.inventory().list().await?;
    Ok(Json(inventory_summary(&items)))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewInventoryItem>,
) -> Result<Json<InventoryItem>, ApiError> {
    validate_item_name(&new.name)?;
    validate_sku(&new.sku)?;
    validate_price_cents(new.unit_cost_cents)?;
    validate_stock_level(new.current_stock)?;
    validate_stock_level(new.min_stock_level)?;

    let item = state.db.inventory().insert(new).await?;
    Ok(Json(item))
}

/// PATCH /api/inventory/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<InventoryItemPatch>,
) -> Result<Json<InventoryItem>, ApiError> {
    if let Some(name) = &patch.name {
        validate_item_name(name)?;
    }
    if let Some(sku) = &patch.sku {
        validate_sku(sku)?;
    }
    if let Some(cost) = patch.unit_cost_cents {
        validate_price_cents(cost)?;
    }

    let item = state.db.inventory().update(&id, patch).await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.inventory().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/inventory/{id}/add-stock
pub async fn add_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockAdjustment>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = workflow::add_inventory_stock(&state.db, &id, body.amount).await?;
    Ok(Json(item))
}

/// POST /api/inventory/{id}/remove-stock
pub async fn remove_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockAdjustment>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item = workflow::remove_inventory_stock(&state.db, &id, body.amount).await?;
    Ok(Json(item))
}
