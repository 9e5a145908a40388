//! # salespro-export: Spreadsheet / PDF Export
//!
//! Pure output transformations over an in-memory snapshot of the business
//! state. No store access: callers fetch the lists, this crate renders them.
//!
//! ## Export Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Export Pipeline                                 │
//! │                                                                         │
//! │  repositories ──► ExportSnapshot ──┬──► excel::workbook_bytes()        │
//! │  (fetched by the caller)           │      Summary + one detail sheet   │
//! │                                    │      per entity (.xlsx bytes)     │
//! │                                    │                                    │
//! │                                    └──► pdf::report_bytes()            │
//! │                                           Printable A4 report with     │
//! │                                           the same tables (.pdf bytes) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use salespro_core::{CatalogItem, DashboardStats, Expense, InventoryItem, Sale};

pub mod excel;
pub mod pdf;

pub use excel::workbook_bytes;
pub use pdf::report_bytes;

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the exports render, captured at one moment.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub stats: DashboardStats,
    pub catalog: Vec<CatalogItem>,
    pub inventory: Vec<InventoryItem>,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Errors
// =============================================================================

/// Export rendering errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Spreadsheet generation failed.
    #[error("Spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// PDF generation failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;
    use chrono::TimeZone;
    use salespro_core::stats;

    pub fn sample_snapshot() -> ExportSnapshot {
        let t = Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();

        let catalog = vec![CatalogItem {
            id: "c1".to_string(),
            name: "Wireless Headphones".to_string(),
            sku: Some("WH-001".to_string()),
            retail_price_cents: 9999,
            unit_cost_cents: 4500,
            current_stock: 25,
            category: Some("Electronics".to_string()),
            unit: None,
            created_at: t,
            updated_at: t,
        }];

        let inventory = vec![InventoryItem {
            id: "i1".to_string(),
            name: "Packaging Boxes".to_string(),
            sku: "PKG-001".to_string(),
            unit_cost_cents: 45,
            current_stock: 3,
            min_stock_level: 50,
            category: Some("Supplies".to_string()),
            created_at: t,
            updated_at: t,
        }];

        let sales = vec![Sale {
            id: "s1".to_string(),
            item_id: "c1".to_string(),
            item_name: "Wireless Headphones".to_string(),
            quantity_sold: 3,
            retail_price_cents: 9999,
            unit_cost_cents: 4500,
            revenue_cents: 29997,
            profit_cents: 16497,
            date: t,
            created_at: t,
        }];

        let expenses = vec![Expense {
            id: "e1".to_string(),
            category: "rent".to_string(),
            description: "Storefront".to_string(),
            amount_cents: 120000,
            date: t,
            created_at: t,
        }];

        ExportSnapshot {
            stats: stats::dashboard_stats(&catalog, &inventory, &sales, &expenses),
            catalog,
            inventory,
            sales,
            expenses,
            generated_at: t,
        }
    }

    pub fn empty_snapshot() -> ExportSnapshot {
        let t = Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();
        ExportSnapshot {
            stats: DashboardStats::default(),
            catalog: vec![],
            inventory: vec![],
            sales: vec![],
            expenses: vec![],
            generated_at: t,
        }
    }
}
