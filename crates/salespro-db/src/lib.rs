//! # salespro-db: Record-Store Layer for SalesPro
//!
//! This crate provides record-store access for the SalesPro system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesPro Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (list_catalog, record_sale, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    salespro-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │   Database    │   │  Repositories │   │  Workflows   │    │   │
//! │  │   │   (pool.rs)   │   │ catalog, sale │   │ record_sale  │    │   │
//! │  │   │               │◄──│ inventory,    │   │ add/remove   │    │   │
//! │  │   │ SqlitePool +  │   │ expense       │   │ stock        │    │   │
//! │  │   │ change hub    │   └───────────────┘   └──────────────┘    │   │
//! │  │   └───────────────┘                                            │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (location from configuration)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (catalog, sale, etc.)
//! - [`workflow`] - The sale-recording and stock-adjustment workflows
//! - [`notify`] - Row-change signal fan-out
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salespro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/salespro.db")).await?;
//!
//! let listing = db.catalog().list_or_default().await;
//! let sale = salespro_db::workflow::record_sale(&db, &item_id, 3).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use notify::{ChangeEvent, ChangeNotifier, Entity};
pub use pool::{Database, DbConfig};
pub use workflow::{WorkflowError, WorkflowResult};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::sale::SaleRepository;
