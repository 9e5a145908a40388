//! # Catalog Routes
//!
//! CRUD over the sellable catalog, stock adjustments, and the per-item sales
//! statistics. The list read ships the built-in fallback variant so the
//! catalog screen always has something to display.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use salespro_core::stats::{item_sales_stats, ItemSalesStats};
use salespro_core::validation::{
    validate_item_name, validate_price_cents, validate_sku, validate_stock_level,
};
use salespro_core::{CatalogItem, CatalogItemPatch, CatalogListing, NewCatalogItem};
use salespro_db::workflow;

use crate::error::ApiError;
use crate::state::AppState;

/// Stock adjustment request body.
#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub amount: i64,
}

/// GET /api/catalog
///
/// Tagged listing: `source` is `"store"` or `"built_in"` depending on which
/// branch produced the items.
pub async fn list(State(state): State<AppState>) -> Json<CatalogListing> {
    Json(state.db.catalog().list_or_default().await)
}

/// POST /api/catalog
pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewCatalogItem>,
) -> Result<Json<CatalogItem>, ApiError> {
    validate_item_name(&new.name)?;
    if let Some(sku) = &new.sku {
        validate_sku(sku)?;
    }
    validate_price_cents(new.retail_price_cents)?;
    validate_price_cents(new.unit_cost_cents)?;
    validate_stock_level(new.current_stock)?;

    let item = state.db.catalog().insert(new).await?;
    Ok(Json(item))
}

/// PATCH /api/catalog/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CatalogItemPatch>,
) -> Result<Json<CatalogItem>, ApiError> {
    if let Some(name) = &patch.name {
        validate_item_name(name)?;
    }
    if let Some(sku) = &patch.sku {
        validate_sku(sku)?;
    }
    if let Some(price) = patch.retail_price_cents {
        validate_price_cents(price)?;
    }
    if let Some(cost) = patch.unit_cost_cents {
        validate_price_cents(cost)?;
    }

    let item = state.db.catalog().update(&id, patch).await?;
    Ok(Json(item))
}

/// DELETE /api/catalog/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.catalog().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/catalog/{id}/add-stock
pub async fn add_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockAdjustment>,
) -> Result<Json<CatalogItem>, ApiError> {
    let item = workflow::add_catalog_stock(&state.db, &id, body.amount).await?;
    Ok(Json(item))
}

/// POST /api/catalog/{id}/remove-stock
pub async fn remove_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockAdjustment>,
) -> Result<Json<CatalogItem>, ApiError> {
    let item = workflow::remove_catalog_stock(&state.db, &id, body.amount).await?;
    Ok(Json(item))
}

/// GET /api/catalog/{id}/sales-stats
///
/// Filtered read plus a pure fold; an item with no sales yields all zeros.
pub async fn sales_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemSalesStats>, ApiError> {
    let sales = state.db.sales().list_for_item(&id).await?;
    Ok(Json(item_sales_stats(&sales, &id)))
}
