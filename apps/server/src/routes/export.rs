//! # Export Routes
//!
//! Snapshot downloads. Handlers fetch the lists, hand the snapshot to
//! `salespro-export`, and stream the bytes back with download headers;
//! the rendering itself is pure.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;

use salespro_core::stats::dashboard_stats;
use salespro_export::{report_bytes, workbook_bytes, ExportSnapshot};

use crate::error::ApiError;
use crate::state::AppState;

/// Fetches everything the exports render, at one moment.
async fn snapshot(state: &AppState) -> Result<ExportSnapshot, ApiError> {
    let db = &state.db;

    let catalog_repo = db.catalog();
    let inventory_repo = db.inventory();
    let sales_repo = db.sales();
    let expenses_repo = db.expenses();
    let (catalog, inventory, sales, expenses) = tokio::try_join!(
        catalog_repo.list(),
        inventory_repo.list(),
        sales_repo.list(),
        expenses_repo.list(),
    )?;

    Ok(ExportSnapshot {
        stats: dashboard_stats(&catalog, &inventory, &sales, &expenses),
        catalog,
        inventory,
        sales,
        expenses,
        generated_at: Utc::now(),
    })
}

fn attachment(filename: &str, content_type: &'static str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
}

/// GET /api/export/spreadsheet
///
/// XLSX workbook: Summary sheet plus one detail sheet per entity.
pub async fn spreadsheet(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = snapshot(&state).await?;
    let bytes = workbook_bytes(&snapshot)?;

    let filename = format!(
        "salespro-export-{}.xlsx",
        snapshot.generated_at.format("%Y-%m-%d")
    );
    Ok(attachment(
        &filename,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        bytes,
    ))
}

/// GET /api/export/report
///
/// Printable A4 PDF with the same tabular content.
pub async fn report(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = snapshot(&state).await?;
    let bytes = report_bytes(&snapshot)?;

    let filename = format!(
        "salespro-report-{}.pdf",
        snapshot.generated_at.format("%Y-%m-%d")
    );
    Ok(attachment(&filename, "application/pdf", bytes))
}
