//! # Aggregation / Statistics
//!
//! Pure functions over already-fetched, in-memory lists. Nothing in this
//! module touches the record store; callers fetch, these functions fold.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard Aggregation                               │
//! │                                                                         │
//! │  repositories ──► Vec<CatalogItem> ─┐                                  │
//! │                   Vec<InventoryItem> ├──► dashboard_stats()             │
//! │                   Vec<Sale>          │        │                         │
//! │                   Vec<Expense>      ─┘        ▼                         │
//! │                                       DashboardStats (derived,          │
//! │                                       recomputed every load)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! Every function here returns zeroed structures on empty input and never
//! fails. Percentages are plain `f64` but are guarded against division by
//! zero (a missing prior month reports a 0% change, not NaN or infinity).

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CatalogItem, DashboardStats, Expense, InventoryItem, Sale};

// =============================================================================
// Sales
// =============================================================================

/// Summary strip shown above the sales list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    pub total_sales: usize,
    pub total_revenue_cents: i64,
    pub total_profit_cents: i64,
    /// Mean revenue per sale, truncated to whole cents. 0 when there are no sales.
    pub average_sale_cents: i64,
}

/// Folds a sales list into its summary figures.
pub fn sales_summary(sales: &[Sale]) -> SalesSummary {
    let total_revenue: Money = sales.iter().map(Sale::revenue).sum();
    let total_profit: Money = sales.iter().map(Sale::profit).sum();

    let average = if sales.is_empty() {
        0
    } else {
        total_revenue.cents() / sales.len() as i64
    };

    SalesSummary {
        total_sales: sales.len(),
        total_revenue_cents: total_revenue.cents(),
        total_profit_cents: total_profit.cents(),
        average_sale_cents: average,
    }
}

/// Per-item sales statistics (the catalog detail view).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemSalesStats {
    pub total_sales: usize,
    pub total_quantity: i64,
    pub total_revenue_cents: i64,
    pub total_profit_cents: i64,
}

/// Filters the sales list by catalog item and sums quantity, revenue, profit.
pub fn item_sales_stats(sales: &[Sale], item_id: &str) -> ItemSalesStats {
    let mut stats = ItemSalesStats::default();

    for sale in sales.iter().filter(|s| s.item_id == item_id) {
        stats.total_sales += 1;
        stats.total_quantity += sale.quantity_sold;
        stats.total_revenue_cents += sale.revenue_cents;
        stats.total_profit_cents += sale.profit_cents;
    }

    stats
}

/// Date window for the sales list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SalesPeriod {
    All,
    /// Since UTC start of today.
    Today,
    /// The 7 days up to and including today.
    Week,
    /// The 30 days up to and including today.
    Month,
}

/// Returns the sales inside the period, newest first.
///
/// Day boundaries are UTC start-of-day; `now` is an input so the function
/// stays pure and testable.
pub fn filter_sales_by_period(sales: &[Sale], period: SalesPeriod, now: DateTime<Utc>) -> Vec<Sale> {
    let today_start = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();

    let cutoff = match period {
        SalesPeriod::All => None,
        SalesPeriod::Today => Some(today_start),
        SalesPeriod::Week => Some(today_start - Duration::days(7)),
        SalesPeriod::Month => Some(today_start - Duration::days(30)),
    };

    let mut filtered: Vec<Sale> = sales
        .iter()
        .filter(|s| cutoff.map_or(true, |c| s.date >= c))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

// =============================================================================
// Low Stock
// =============================================================================

/// Catalog items at or below the fixed low-stock threshold, including zero.
pub fn low_stock_catalog(items: &[CatalogItem]) -> Vec<CatalogItem> {
    items.iter().filter(|i| i.is_low_stock()).cloned().collect()
}

/// Inventory items at or below their own `min_stock_level`, including zero.
pub fn low_stock_inventory(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).cloned().collect()
}

/// Inventory screen summary strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    pub total_items: usize,
    /// Items low on stock but not yet out (out-of-stock is its own bucket here).
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Σ current_stock × unit cost.
    pub total_value_cents: i64,
}

/// Folds the inventory list into its summary figures.
pub fn inventory_summary(items: &[InventoryItem]) -> InventorySummary {
    InventorySummary {
        total_items: items.len(),
        low_stock: items
            .iter()
            .filter(|i| i.is_low_stock() && !i.is_out_of_stock())
            .count(),
        out_of_stock: items.iter().filter(|i| i.is_out_of_stock()).count(),
        total_value_cents: items.iter().map(InventoryItem::stock_value).sum::<Money>().cents(),
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Computes the full dashboard block from the four entity lists.
///
/// The low-stock count combines both item kinds: catalog items against the
/// fixed threshold, inventory items against their per-item threshold, both
/// inclusive of zero.
pub fn dashboard_stats(
    catalog: &[CatalogItem],
    inventory: &[InventoryItem],
    sales: &[Sale],
    expenses: &[Expense],
) -> DashboardStats {
    let total_revenue: Money = sales.iter().map(Sale::revenue).sum();
    let total_profit: Money = sales.iter().map(Sale::profit).sum();
    let total_expenses: Money = expenses.iter().map(Expense::amount).sum();
    let net_profit = total_profit - total_expenses;

    let low_stock_count = catalog.iter().filter(|i| i.is_low_stock()).count()
        + inventory.iter().filter(|i| i.is_low_stock()).count();

    DashboardStats {
        total_revenue_cents: total_revenue.cents(),
        total_profit_cents: total_profit.cents(),
        total_expenses_cents: total_expenses.cents(),
        net_profit_cents: net_profit.cents(),
        total_catalog_items: catalog.len(),
        total_inventory_items: inventory.len(),
        total_sales: sales.len(),
        low_stock_count,
    }
}

// =============================================================================
// Expenses
// =============================================================================

/// The category with the largest summed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopCategory {
    pub name: String,
    pub amount_cents: i64,
    /// Share of the grand total, in percent.
    pub percentage: f64,
}

/// Expense screen statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseStats {
    pub total_cents: i64,
    pub this_month_cents: i64,
    pub last_month_cents: i64,
    /// Percentage change vs the previous calendar month.
    /// Exactly 0 when the previous month had no expenses.
    pub month_over_month_change: f64,
    /// `None` when there are no expenses at all.
    pub top_category: Option<TopCategory>,
}

/// Computes expense statistics over calendar months (UTC).
///
/// `now` anchors which month counts as "this month"; it is an input so the
/// function stays pure and the month boundary is testable.
pub fn expense_stats(expenses: &[Expense], now: DateTime<Utc>) -> ExpenseStats {
    let total: Money = expenses.iter().map(Expense::amount).sum();

    let this_month = (now.year(), now.month());
    let last_month = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };

    let month_total = |(year, month): (i32, u32)| -> i64 {
        expenses
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .map(Expense::amount)
            .sum::<Money>()
            .cents()
    };

    let this_month_cents = month_total(this_month);
    let last_month_cents = month_total(last_month);

    let month_over_month_change = if last_month_cents > 0 {
        (this_month_cents - last_month_cents) as f64 / last_month_cents as f64 * 100.0
    } else {
        0.0
    };

    // Per-category totals; BTreeMap keeps tie-breaking deterministic
    // (first-in-alphabet wins when two categories sum equal).
    let mut by_category: BTreeMap<&str, i64> = BTreeMap::new();
    for expense in expenses {
        *by_category.entry(expense.category.as_str()).or_insert(0) += expense.amount_cents;
    }

    let top_category = by_category
        .into_iter()
        .fold(None::<(&str, i64)>, |best, (name, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((name, amount)),
        })
        .map(|(name, amount_cents)| TopCategory {
            name: name.to_string(),
            amount_cents,
            percentage: if total.cents() > 0 {
                amount_cents as f64 / total.cents() as f64 * 100.0
            } else {
                0.0
            },
        });

    ExpenseStats {
        total_cents: total.cents(),
        this_month_cents,
        last_month_cents,
        month_over_month_change,
        top_category,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    fn sale(item_id: &str, qty: i64, price: i64, cost: i64, date: DateTime<Utc>) -> Sale {
        Sale {
            id: format!("sale-{item_id}-{qty}"),
            item_id: item_id.to_string(),
            item_name: "Item".to_string(),
            quantity_sold: qty,
            retail_price_cents: price,
            unit_cost_cents: cost,
            revenue_cents: price * qty,
            profit_cents: (price - cost) * qty,
            date,
            created_at: date,
        }
    }

    fn expense(category: &str, amount: i64, date: DateTime<Utc>) -> Expense {
        Expense {
            id: format!("exp-{category}-{amount}"),
            category: category.to_string(),
            description: String::new(),
            amount_cents: amount,
            date,
            created_at: date,
        }
    }

    fn catalog_item(stock: i64) -> CatalogItem {
        CatalogItem {
            id: format!("item-{stock}"),
            name: "Item".to_string(),
            sku: None,
            retail_price_cents: 1000,
            unit_cost_cents: 400,
            current_stock: stock,
            category: None,
            unit: None,
            created_at: ts(2026, 1, 1),
            updated_at: ts(2026, 1, 1),
        }
    }

    fn inventory_item(stock: i64, min: i64) -> InventoryItem {
        InventoryItem {
            id: format!("inv-{stock}-{min}"),
            name: "Material".to_string(),
            sku: "M-1".to_string(),
            unit_cost_cents: 100,
            current_stock: stock,
            min_stock_level: min,
            category: None,
            created_at: ts(2026, 1, 1),
            updated_at: ts(2026, 1, 1),
        }
    }

    #[test]
    fn test_sales_summary_empty_is_zeroed() {
        let summary = sales_summary(&[]);
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn test_sales_summary() {
        let sales = vec![
            sale("a", 3, 10000, 6000, ts(2026, 8, 1)),
            sale("b", 1, 5000, 2000, ts(2026, 8, 2)),
        ];
        let summary = sales_summary(&sales);
        assert_eq!(summary.total_sales, 2);
        assert_eq!(summary.total_revenue_cents, 35000);
        assert_eq!(summary.total_profit_cents, 15000);
        assert_eq!(summary.average_sale_cents, 17500);
    }

    #[test]
    fn test_item_sales_stats_filters_by_item() {
        let sales = vec![
            sale("a", 3, 10000, 6000, ts(2026, 8, 1)),
            sale("b", 2, 5000, 2000, ts(2026, 8, 1)),
            sale("a", 1, 10000, 6000, ts(2026, 8, 2)),
        ];
        let stats = item_sales_stats(&sales, "a");
        assert_eq!(stats.total_sales, 2);
        assert_eq!(stats.total_quantity, 4);
        assert_eq!(stats.total_revenue_cents, 40000);
        assert_eq!(stats.total_profit_cents, 16000);

        assert_eq!(item_sales_stats(&sales, "missing"), ItemSalesStats::default());
    }

    #[test]
    fn test_filter_sales_by_period() {
        let now = ts(2026, 8, 7);
        let sales = vec![
            sale("old", 1, 100, 50, ts(2026, 6, 1)),
            sale("week", 1, 100, 50, ts(2026, 8, 3)),
            sale("today", 1, 100, 50, now),
        ];

        assert_eq!(filter_sales_by_period(&sales, SalesPeriod::All, now).len(), 3);
        assert_eq!(filter_sales_by_period(&sales, SalesPeriod::Month, now).len(), 2);
        assert_eq!(filter_sales_by_period(&sales, SalesPeriod::Week, now).len(), 2);

        let today = filter_sales_by_period(&sales, SalesPeriod::Today, now);
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].item_id, "today");
    }

    #[test]
    fn test_filter_sales_sorts_newest_first() {
        let now = ts(2026, 8, 7);
        let sales = vec![
            sale("first", 1, 100, 50, ts(2026, 8, 1)),
            sale("second", 1, 100, 50, ts(2026, 8, 5)),
        ];
        let all = filter_sales_by_period(&sales, SalesPeriod::All, now);
        assert_eq!(all[0].item_id, "second");
        assert_eq!(all[1].item_id, "first");
    }

    #[test]
    fn test_dashboard_stats_empty_inputs() {
        let stats = dashboard_stats(&[], &[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_dashboard_stats() {
        let catalog = vec![catalog_item(0), catalog_item(5), catalog_item(20)];
        let inventory = vec![inventory_item(2, 5), inventory_item(50, 5)];
        let sales = vec![sale("a", 3, 10000, 6000, ts(2026, 8, 1))];
        let expenses = vec![expense("rent", 5000, ts(2026, 8, 1))];

        let stats = dashboard_stats(&catalog, &inventory, &sales, &expenses);
        assert_eq!(stats.total_revenue_cents, 30000);
        assert_eq!(stats.total_profit_cents, 12000);
        assert_eq!(stats.total_expenses_cents, 5000);
        assert_eq!(stats.net_profit_cents, 7000);
        assert_eq!(stats.total_catalog_items, 3);
        assert_eq!(stats.total_inventory_items, 2);
        assert_eq!(stats.total_sales, 1);
        // catalog: stock 0 and 5 are low (inclusive), 20 is not; inventory: 2 <= 5
        assert_eq!(stats.low_stock_count, 3);
    }

    #[test]
    fn test_low_stock_includes_zero() {
        let catalog = vec![catalog_item(0), catalog_item(6)];
        let low = low_stock_catalog(&catalog);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].current_stock, 0);

        let inventory = vec![inventory_item(0, 5), inventory_item(5, 5), inventory_item(6, 5)];
        assert_eq!(low_stock_inventory(&inventory).len(), 2);
    }

    #[test]
    fn test_inventory_summary_buckets() {
        let items = vec![
            inventory_item(0, 5),  // out of stock
            inventory_item(3, 5),  // low
            inventory_item(10, 5), // fine
        ];
        let summary = inventory_summary(&items);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.total_value_cents, 1300);
    }

    #[test]
    fn test_expense_stats_empty_is_zeroed() {
        let stats = expense_stats(&[], ts(2026, 8, 7));
        assert_eq!(stats.total_cents, 0);
        assert_eq!(stats.month_over_month_change, 0.0);
        assert!(stats.top_category.is_none());
    }

    /// Three expenses of 50, 30, 20 in categories A, A, B:
    /// top category is A with 80, at 61.5% of the total.
    #[test]
    fn test_top_category() {
        let now = ts(2026, 8, 7);
        let expenses = vec![
            expense("A", 5000, now),
            expense("A", 3000, now),
            expense("B", 2000, now),
        ];
        let stats = expense_stats(&expenses, now);
        let top = stats.top_category.expect("has a top category");
        assert_eq!(top.name, "A");
        assert_eq!(top.amount_cents, 8000);
        assert!((top.percentage - 61.5).abs() < 0.1);
    }

    #[test]
    fn test_month_over_month_zero_prior_month() {
        let now = ts(2026, 8, 7);
        // All expenses this month; July is empty.
        let expenses = vec![expense("rent", 5000, ts(2026, 8, 2))];
        let stats = expense_stats(&expenses, now);
        assert_eq!(stats.this_month_cents, 5000);
        assert_eq!(stats.last_month_cents, 0);
        assert_eq!(stats.month_over_month_change, 0.0);
        assert!(stats.month_over_month_change.is_finite());
    }

    #[test]
    fn test_month_over_month_change() {
        let now = ts(2026, 8, 7);
        let expenses = vec![
            expense("rent", 4000, ts(2026, 7, 15)),
            expense("rent", 5000, ts(2026, 8, 2)),
        ];
        let stats = expense_stats(&expenses, now);
        assert!((stats.month_over_month_change - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_over_month_wraps_january() {
        let now = ts(2026, 1, 10);
        let expenses = vec![
            expense("rent", 2000, ts(2025, 12, 20)),
            expense("rent", 1000, ts(2026, 1, 5)),
        ];
        let stats = expense_stats(&expenses, now);
        assert_eq!(stats.this_month_cents, 1000);
        assert_eq!(stats.last_month_cents, 2000);
        assert!((stats.month_over_month_change - -50.0).abs() < 1e-9);
    }
}
