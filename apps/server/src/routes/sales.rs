//! # Sales Routes
//!
//! Listing with the optional date-window filter, the summary strip, and the
//! sale-recording workflow. Sales are immutable: there is no PATCH/DELETE
//! surface here.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use salespro_core::stats::{filter_sales_by_period, sales_summary, SalesPeriod, SalesSummary};
use salespro_core::Sale;
use salespro_db::workflow;

use crate::error::ApiError;
use crate::routes::ListResponse;
use crate::state::AppState;

/// Query parameters for the sales list and summary.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    /// Date window; omitted means all sales.
    pub period: Option<SalesPeriod>,
}

/// Request body for recording a sale.
///
/// Prices are deliberately absent: the workflow snapshots the item's
/// current price and cost, a client cannot override them.
#[derive(Debug, Deserialize)]
pub struct RecordSaleRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// GET /api/sales?period=today|week|month
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Json<ListResponse<Sale>> {
    let result = state.db.sales().list().await.map(|sales| match query.period {
        Some(period) => filter_sales_by_period(&sales, period, Utc::now()),
        None => sales,
    });

    Json(ListResponse::from_result(result))
}

/// GET /api/sales/summary?period=...
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<SalesSummary>, ApiError> {
    let sales = state.db.sales().list().await?;
    let windowed = match query.period {
        Some(period) => filter_sales_by_period(&sales, period, Utc::now()),
        None => sales,
    };
    Ok(Json(sales_summary(&windowed)))
}

/// POST /api/sales
///
/// Runs the sale workflow: fresh item read, stock check, atomic decrement,
/// snapshot insert. Insufficient stock comes back as 409 naming the
/// available quantity; nothing is written in that case.
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<RecordSaleRequest>,
) -> Result<Json<Sale>, ApiError> {
    let sale = workflow::record_sale(&state.db, &body.item_id, body.quantity).await?;
    Ok(Json(sale))
}
