//! # Dashboard Route
//!
//! One round of fetches, one pure fold. The derived stats are recomputed on
//! every load and never cached; a failed fetch yields zeroed stats plus the
//! `fetchError` flag (the dashboard renders either way).

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use salespro_core::stats::{dashboard_stats, low_stock_catalog, low_stock_inventory};
use salespro_core::{CatalogItem, DashboardStats, InventoryItem, Sale};

use crate::state::AppState;

/// How many recent sales the dashboard shows.
const RECENT_SALES: usize = 5;

/// Everything the dashboard screen renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_sales: Vec<Sale>,
    pub low_stock_catalog: Vec<CatalogItem>,
    pub low_stock_inventory: Vec<InventoryItem>,
    pub fetch_error: Option<String>,
}

/// GET /api/dashboard
pub async fn overview(State(state): State<AppState>) -> Json<DashboardResponse> {
    let db = &state.db;

    let catalog = db.catalog();
    let inventory = db.inventory();
    let sales = db.sales();
    let expenses = db.expenses();
    let fetched = tokio::try_join!(
        catalog.list(),
        inventory.list(),
        sales.list(),
        expenses.list(),
    );

    let response = match fetched {
        Ok((catalog, inventory, sales, expenses)) => DashboardResponse {
            stats: dashboard_stats(&catalog, &inventory, &sales, &expenses),
            recent_sales: sales.iter().take(RECENT_SALES).cloned().collect(),
            low_stock_catalog: low_stock_catalog(&catalog),
            low_stock_inventory: low_stock_inventory(&inventory),
            fetch_error: None,
        },
        Err(e) => {
            warn!(error = %e, "dashboard fetch failed, serving zeroed stats");
            DashboardResponse {
                stats: DashboardStats::default(),
                recent_sales: Vec::new(),
                low_stock_catalog: Vec::new(),
                low_stock_inventory: Vec::new(),
                fetch_error: Some(e.to_string()),
            }
        }
    };

    Json(response)
}
