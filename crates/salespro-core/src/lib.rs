//! # salespro-core: Pure Business Logic for SalesPro
//!
//! This crate is the **heart** of SalesPro. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SalesPro Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (single-page app)                     │   │
//! │  │    Dashboard ──► Catalog ──► Sales ──► Inventory ──► Expenses  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / WebSocket                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     apps/server (Axum)                          │   │
//! │  │    list/create/patch/delete, record_sale, stats, export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ salespro-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│  │   │
//! │  │   │ CatalogIt.│  │   Money   │  │ Dashboard │  │   rules   │  │   │
//! │  │   │   Sale    │  │ rev/profit│  │ Expenses  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  salespro-db (Record-Store Layer)               │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Sale, InventoryItem, Expense)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stats`] - Aggregation over already-fetched lists (dashboard, expenses)
//! - [`catalog`] - Built-in fallback catalog and the tagged listing source
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use salespro_core::Money` instead of
// `use salespro_core::money::Money`

pub use catalog::{default_catalog, CatalogListing, CatalogSource};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a catalog item counts as "low stock".
///
/// Inventory items carry their own per-item `min_stock_level` instead;
/// this constant only applies to the sellable catalog.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum quantity accepted for a single sale or stock adjustment.
///
/// Guards against fat-finger entries (e.g. typing 1000 instead of 10).
pub const MAX_SALE_QUANTITY: i64 = 999;
