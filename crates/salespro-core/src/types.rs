//! # Domain Types
//!
//! Core domain types used throughout SalesPro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │      Sale       │   │ InventoryItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  item_id (ref)  │   │  sku            │       │
//! │  │  retail_price   │   │  name snapshot  │   │  current_stock  │       │
//! │  │  current_stock  │   │  revenue/profit │   │  min_stock_level│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Expense      │   │ DashboardStats  │  (derived, never stored)    │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  category       │   │  totals, counts │                             │
//! │  │  amount_cents   │   │  low stock      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` copies the catalog item's name, retail price and unit cost at the
//! moment it is recorded. Later edits to the catalog item never change
//! historical revenue/profit figures.
//!
//! ## Naming
//! Deployments label the sellable unit differently (product, menu item,
//! vegetable). The type here is a single `CatalogItem` whose `name` field is
//! the only deployment-visible difference; nothing else in the system cares
//! what the unit is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable unit with price, cost and stock on hand.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog and copied onto sales.
    pub name: String,

    /// Optional Stock Keeping Unit - business identifier.
    pub sku: Option<String>,

    /// Unit retail price in cents.
    pub retail_price_cents: i64,

    /// Unit cost in cents (for profit calculations).
    pub unit_cost_cents: i64,

    /// Current stock level. Never driven negative by a sale.
    pub current_stock: i64,

    /// Optional category (e.g. "Electronics").
    pub category: Option<String>,

    /// Optional unit of sale (e.g. "kg", "piece").
    pub unit: Option<String>,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the retail price as a Money type.
    #[inline]
    pub fn retail_price(&self) -> Money {
        Money::from_cents(self.retail_price_cents)
    }

    /// Returns the unit cost as a Money type.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents)
    }

    /// Checks whether the requested quantity can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.current_stock
    }

    /// Low stock means at or below [`LOW_STOCK_THRESHOLD`], including zero.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of one stock-decreasing transaction.
///
/// Price, cost and name are snapshots taken when the sale was recorded;
/// `revenue_cents` and `profit_cents` are derived from those snapshots by the
/// sale workflow and are never independently editable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,

    /// The catalog item this sale decremented.
    pub item_id: String,

    /// Item name at time of sale (frozen).
    pub item_name: String,

    /// Quantity sold.
    pub quantity_sold: i64,

    /// Unit retail price in cents at time of sale (frozen).
    pub retail_price_cents: i64,

    /// Unit cost in cents at time of sale (frozen).
    pub unit_cost_cents: i64,

    /// retail_price_cents × quantity_sold.
    pub revenue_cents: i64,

    /// (retail_price_cents − unit_cost_cents) × quantity_sold.
    pub profit_cents: i64,

    /// When the sale happened (business date).
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// When the row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }

    /// Returns the profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }

    /// Returns the frozen unit retail price as Money.
    #[inline]
    pub fn retail_price(&self) -> Money {
        Money::from_cents(self.retail_price_cents)
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A raw-material inventory item, separate from the sellable catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,

    /// Stock Keeping Unit - required for raw materials.
    pub sku: String,

    /// Unit cost in cents.
    pub unit_cost_cents: i64,

    /// Current stock level.
    pub current_stock: i64,

    /// Per-item low-stock threshold, inclusive.
    pub min_stock_level: i64,

    pub category: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Low stock means at or below the item's own threshold, including zero.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_level
    }

    /// Out of stock means exactly zero on hand.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock == 0
    }

    /// Value of the stock on hand: current_stock × unit cost.
    #[inline]
    pub fn stock_value(&self) -> Money {
        Money::from_cents(self.unit_cost_cents).multiply_quantity(self.current_stock)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A logged business expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Expense {
    pub id: String,

    /// Free-text category (e.g. "rent", "utilities").
    pub category: String,

    pub description: String,

    /// Amount in cents.
    pub amount_cents: i64,

    /// When the expense was incurred.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Derived dashboard figures. Recomputed on every dashboard load from the
/// other four entities; never persisted or cached across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    /// Σ Sale.revenue_cents
    pub total_revenue_cents: i64,

    /// Σ Sale.profit_cents
    pub total_profit_cents: i64,

    /// Σ Expense.amount_cents
    pub total_expenses_cents: i64,

    /// total_profit_cents − total_expenses_cents (can be negative)
    pub net_profit_cents: i64,

    /// Number of catalog items.
    pub total_catalog_items: usize,

    /// Number of inventory items.
    pub total_inventory_items: usize,

    /// Number of recorded sales.
    pub total_sales: usize,

    /// Low-stock catalog items plus low-stock inventory items.
    pub low_stock_count: usize,
}

// =============================================================================
// Create / Patch Inputs
// =============================================================================
// Identifiers and timestamps are always generated server-side, so the create
// inputs omit them; the patch inputs make every field optional. A missing
// field is left unchanged; optional fields cannot be unset through a patch.

/// Input for creating a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCatalogItem {
    pub name: String,
    pub sku: Option<String>,
    pub retail_price_cents: i64,
    pub unit_cost_cents: i64,
    pub current_stock: i64,
    pub category: Option<String>,
    pub unit: Option<String>,
}

/// Partial patch for a catalog item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub retail_price_cents: Option<i64>,
    pub unit_cost_cents: Option<i64>,
    pub current_stock: Option<i64>,
    pub category: Option<String>,
    pub unit: Option<String>,
}

/// Input for creating an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInventoryItem {
    pub name: String,
    pub sku: String,
    pub unit_cost_cents: i64,
    pub current_stock: i64,
    pub min_stock_level: i64,
    pub category: Option<String>,
}

/// Partial patch for an inventory item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub unit_cost_cents: Option<i64>,
    pub current_stock: Option<i64>,
    pub min_stock_level: Option<i64>,
    pub category: Option<String>,
}

/// Input for logging an expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExpense {
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
    /// Defaults to "now" at the store layer when omitted.
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
}

/// Partial patch for an expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpensePatch {
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(stock: i64) -> CatalogItem {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        CatalogItem {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name: "Phone Case".to_string(),
            sku: Some("PC-003".to_string()),
            retail_price_cents: 2499,
            unit_cost_cents: 800,
            current_stock: stock,
            category: Some("Accessories".to_string()),
            unit: None,
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn test_can_sell() {
        let i = item(10);
        assert!(i.can_sell(1));
        assert!(i.can_sell(10));
        assert!(!i.can_sell(11));
        assert!(!i.can_sell(0));
        assert!(!i.can_sell(-3));
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(item(0).is_low_stock());
        assert!(item(5).is_low_stock());
        assert!(!item(6).is_low_stock());
    }

    #[test]
    fn test_inventory_thresholds() {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let inv = InventoryItem {
            id: "id".to_string(),
            name: "Flour".to_string(),
            sku: "FL-001".to_string(),
            unit_cost_cents: 150,
            current_stock: 8,
            min_stock_level: 8,
            category: None,
            created_at: t,
            updated_at: t,
        };
        assert!(inv.is_low_stock());
        assert!(!inv.is_out_of_stock());
        assert_eq!(inv.stock_value().cents(), 1200);
    }

    #[test]
    fn test_dashboard_stats_default_is_zeroed() {
        let stats = DashboardStats::default();
        assert_eq!(stats.total_revenue_cents, 0);
        assert_eq!(stats.low_stock_count, 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let i = item(7);
        let json = serde_json::to_string(&i).unwrap();
        let back: CatalogItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_stock, 7);
        assert_eq!(back.sku.as_deref(), Some("PC-003"));
    }
}
