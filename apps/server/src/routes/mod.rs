//! # Route Handlers
//!
//! One module per screen-shaped resource. Handlers validate input, call the
//! repositories/workflows, and shape responses; aggregation itself lives in
//! `salespro_core::stats`.
//!
//! ## Read vs Write Propagation
//! List reads are swallowed into an empty list plus a `fetchError` flag so
//! the UI never crashes on load; writes propagate as [`crate::error::ApiError`]
//! with proper HTTP statuses so the initiating action can report failure.

pub mod catalog;
pub mod dashboard;
pub mod events;
pub mod expenses;
pub mod export;
pub mod inventory;
pub mod sales;

use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use salespro_db::DbResult;

use crate::state::AppState;

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Catalog
        .route("/api/catalog", get(catalog::list).post(catalog::create))
        .route(
            "/api/catalog/{id}",
            patch(catalog::update).delete(catalog::remove),
        )
        .route("/api/catalog/{id}/add-stock", post(catalog::add_stock))
        .route("/api/catalog/{id}/remove-stock", post(catalog::remove_stock))
        .route("/api/catalog/{id}/sales-stats", get(catalog::sales_stats))
        // Inventory
        .route(
            "/api/inventory",
            get(inventory::list).post(inventory::create),
        )
        .route("/api/inventory/summary", get(inventory::summary))
        .route(
            "/api/inventory/{id}",
            patch(inventory::update).delete(inventory::remove),
        )
        .route("/api/inventory/{id}/add-stock", post(inventory::add_stock))
        .route(
            "/api/inventory/{id}/remove-stock",
            post(inventory::remove_stock),
        )
        // Sales
        .route("/api/sales", get(sales::list).post(sales::record))
        .route("/api/sales/summary", get(sales::summary))
        // Expenses
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/stats", get(expenses::stats))
        .route(
            "/api/expenses/{id}",
            patch(expenses::update).delete(expenses::remove),
        )
        // Dashboard
        .route("/api/dashboard", get(dashboard::overview))
        // Export
        .route("/api/export/spreadsheet", get(export::spreadsheet))
        .route("/api/export/report", get(export::report))
        // Change feed
        .route("/api/events", get(events::subscribe))
        .with_state(state)
}

// =============================================================================
// Shared Response Shapes
// =============================================================================

/// List payload with the swallowed-error flag.
///
/// A failed fetch yields `items: []` plus the error message; the HTTP status
/// stays 200 so list screens render (empty) instead of crashing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub fetch_error: Option<String>,
}

impl<T> ListResponse<T> {
    /// Applies the read-propagation policy to a repository result.
    pub fn from_result(result: DbResult<Vec<T>>) -> Self {
        match result {
            Ok(items) => ListResponse {
                items,
                fetch_error: None,
            },
            Err(e) => {
                warn!(error = %e, "list fetch failed, serving empty list");
                ListResponse {
                    items: Vec::new(),
                    fetch_error: Some(e.to_string()),
                }
            }
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Liveness probe: checks the store can execute a query.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: state.db.health_check().await,
    })
}
