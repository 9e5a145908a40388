//! # Sale and Stock-Adjustment Workflows
//!
//! The multi-step write sequences of the system. Everything else is a single
//! store round trip; these compose validation, a fresh read and a guarded
//! write, so they live here rather than in a repository.
//!
//! ## Sale Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        record_sale(item, qty)                           │
//! │                                                                         │
//! │  1. validate quantity (before any store call)                          │
//! │  2. BEGIN                                                              │
//! │  3. SELECT item fresh (never trust caller state)                       │
//! │       ├── missing ──► ItemNotFound                                     │
//! │       └── qty > stock ──► InsufficientStock { available }              │
//! │  4. UPDATE ... SET stock = stock - qty                                 │
//! │         WHERE id = ? AND stock >= qty   ← authoritative guard          │
//! │       └── 0 rows ──► InsufficientStock (concurrent sale won)           │
//! │  5. INSERT sale (name/price/cost snapshot, derived revenue/profit)     │
//! │  6. COMMIT, then publish change signals                                │
//! │                                                                         │
//! │  The conditional decrement closes the classic read-modify-write race:  │
//! │  two concurrent sales can both pass step 3, but only one can win       │
//! │  step 4, so stock never goes negative and no sale row is recorded      │
//! │  without its stock actually having been taken.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Behavior
//! Any failure before COMMIT leaves the store untouched: no sale row, no
//! stock change. Nothing is retried; the caller reports the failure and the
//! user re-attempts manually.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;
use crate::notify::Entity;
use crate::pool::Database;
use salespro_core::money::{sale_profit, sale_revenue};
use salespro_core::validation::{validate_quantity, validate_stock_amount};
use salespro_core::{CatalogItem, CoreError, InventoryItem, Sale};

// =============================================================================
// Workflow Error
// =============================================================================

/// Error surface of the multi-step workflows: domain rules or the store.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Business rule violation (not found, insufficient stock, bad input).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Record-store failure.
    #[error(transparent)]
    Store(#[from] DbError),
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<salespro_core::ValidationError> for WorkflowError {
    fn from(err: salespro_core::ValidationError) -> Self {
        WorkflowError::Domain(CoreError::Validation(err))
    }
}

// =============================================================================
// Sale Workflow
// =============================================================================

/// Records a sale of `quantity` units of the given catalog item.
///
/// Revenue and profit are derived from the item's **current** price and cost
/// (never from caller-supplied figures) and frozen onto the sale row along
/// with the item's name. On success the item's stock has decreased by
/// exactly `quantity` and the created [`Sale`] is returned.
///
/// ## Errors
/// * [`CoreError::Validation`] - quantity is not a positive integer ≤ 999
/// * [`CoreError::ItemNotFound`] - no such catalog item
/// * [`CoreError::InsufficientStock`] - quantity exceeds current stock;
///   names the available quantity and leaves the store untouched
/// * [`DbError`] - store/transport failure
pub async fn record_sale(db: &Database, item_id: &str, quantity: i64) -> WorkflowResult<Sale> {
    validate_quantity(quantity)?;

    debug!(item_id = %item_id, quantity = %quantity, "Recording sale");

    let mut tx = db.pool().begin().await.map_err(DbError::from)?;

    // Fresh read inside the transaction; in-memory UI state may be stale.
    let item = sqlx::query_as::<_, CatalogItem>(
        r#"
        SELECT id, name, sku, retail_price_cents, unit_cost_cents,
               current_stock, category, unit, created_at, updated_at
        FROM catalog_items
        WHERE id = ?1
        "#,
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(DbError::from)?
    .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

    if quantity > item.current_stock {
        return Err(CoreError::InsufficientStock {
            name: item.name,
            available: item.current_stock,
            requested: quantity,
        }
        .into());
    }

    let now = Utc::now();

    // Conditional decrement: the WHERE guard is the authoritative stock
    // check, so a concurrent sale between the read above and this write
    // cannot overdraw the item.
    let decremented = sqlx::query(
        r#"
        UPDATE catalog_items SET
            current_stock = current_stock - ?2,
            updated_at = ?3
        WHERE id = ?1 AND current_stock >= ?2
        "#,
    )
    .bind(item_id)
    .bind(quantity)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(DbError::from)?;

    if decremented.rows_affected() == 0 {
        return Err(CoreError::InsufficientStock {
            name: item.name,
            available: item.current_stock,
            requested: quantity,
        }
        .into());
    }

    let revenue = sale_revenue(item.retail_price(), quantity);
    let profit = sale_profit(item.retail_price(), item.unit_cost(), quantity);

    let sale = Sale {
        id: Uuid::new_v4().to_string(),
        item_id: item.id,
        item_name: item.name,
        quantity_sold: quantity,
        retail_price_cents: item.retail_price_cents,
        unit_cost_cents: item.unit_cost_cents,
        revenue_cents: revenue.cents(),
        profit_cents: profit.cents(),
        date: now,
        created_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO sales (
            id, item_id, item_name, quantity_sold,
            retail_price_cents, unit_cost_cents,
            revenue_cents, profit_cents, date, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&sale.id)
    .bind(&sale.item_id)
    .bind(&sale.item_name)
    .bind(sale.quantity_sold)
    .bind(sale.retail_price_cents)
    .bind(sale.unit_cost_cents)
    .bind(sale.revenue_cents)
    .bind(sale.profit_cents)
    .bind(sale.date)
    .bind(sale.created_at)
    .execute(&mut *tx)
    .await
    .map_err(DbError::from)?;

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    db.notifier().notify(Entity::Sales);
    db.notifier().notify(Entity::CatalogItems);

    info!(
        sale_id = %sale.id,
        item = %sale.item_name,
        quantity = %quantity,
        revenue = %revenue,
        "Sale recorded"
    );

    Ok(sale)
}

// =============================================================================
// Stock Adjustments
// =============================================================================

/// Adds stock to a catalog item after validating the amount.
pub async fn add_catalog_stock(
    db: &Database,
    item_id: &str,
    amount: i64,
) -> WorkflowResult<CatalogItem> {
    validate_stock_amount(amount)?;
    Ok(db.catalog().add_stock(item_id, amount).await?)
}

/// Removes stock from a catalog item, clamping at zero.
pub async fn remove_catalog_stock(
    db: &Database,
    item_id: &str,
    amount: i64,
) -> WorkflowResult<CatalogItem> {
    validate_stock_amount(amount)?;
    Ok(db.catalog().remove_stock(item_id, amount).await?)
}

/// Adds stock to an inventory item after validating the amount.
pub async fn add_inventory_stock(
    db: &Database,
    item_id: &str,
    amount: i64,
) -> WorkflowResult<InventoryItem> {
    validate_stock_amount(amount)?;
    Ok(db.inventory().add_stock(item_id, amount).await?)
}

/// Removes stock from an inventory item, clamping at zero.
pub async fn remove_inventory_stock(
    db: &Database,
    item_id: &str,
    amount: i64,
) -> WorkflowResult<InventoryItem> {
    validate_stock_amount(amount)?;
    Ok(db.inventory().remove_stock(item_id, amount).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use salespro_core::NewCatalogItem;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// The canonical item: stock=10, price=$100.00, cost=$60.00.
    fn canonical_item() -> NewCatalogItem {
        NewCatalogItem {
            name: "Widget".to_string(),
            sku: Some("WID-001".to_string()),
            retail_price_cents: 10000,
            unit_cost_cents: 6000,
            current_stock: 10,
            category: None,
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_record_sale_computes_revenue_and_profit() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        let sale = record_sale(&db, &item.id, 3).await.unwrap();

        assert_eq!(sale.revenue_cents, 30000); // $300.00
        assert_eq!(sale.profit_cents, 12000); // $120.00
        assert_eq!(sale.quantity_sold, 3);
        assert_eq!(sale.item_name, "Widget");
        assert_eq!(sale.retail_price_cents, 10000);
        assert_eq!(sale.unit_cost_cents, 6000);

        let after = db.catalog().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.current_stock, 7);
    }

    #[tokio::test]
    async fn test_insufficient_stock_mutates_nothing() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        let err = record_sale(&db, &item.id, 15).await.unwrap_err();
        match err {
            WorkflowError::Domain(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 10);
                assert_eq!(requested, 15);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // No sale row, stock untouched.
        assert_eq!(db.sales().count().await.unwrap(), 0);
        let after = db.catalog().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.current_stock, 10);
    }

    #[tokio::test]
    async fn test_selling_exact_stock_reaches_zero_not_below() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        record_sale(&db, &item.id, 10).await.unwrap();

        let after = db.catalog().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.current_stock, 0);

        // The shelf is empty now; one more unit must be refused.
        assert!(matches!(
            record_sale(&db, &item.id, 1).await.unwrap_err(),
            WorkflowError::Domain(CoreError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_item_is_not_found() {
        let db = test_db().await;
        assert!(matches!(
            record_sale(&db, "no-such-id", 1).await.unwrap_err(),
            WorkflowError::Domain(CoreError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected_before_store() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        for bad in [0, -5, 1000] {
            assert!(matches!(
                record_sale(&db, &item.id, bad).await.unwrap_err(),
                WorkflowError::Domain(CoreError::Validation(_))
            ));
        }

        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_snapshots_survive_price_edits() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        let sale = record_sale(&db, &item.id, 2).await.unwrap();

        // Reprice the item afterwards; the sale keeps its frozen figures.
        db.catalog()
            .update(
                &item.id,
                salespro_core::CatalogItemPatch {
                    retail_price_cents: Some(99900),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(stored.retail_price_cents, 10000);
        assert_eq!(stored.revenue_cents, 20000);
    }

    #[tokio::test]
    async fn test_sale_publishes_both_change_events() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        let mut changes = db.subscribe_changes();
        record_sale(&db, &item.id, 1).await.unwrap();

        let first = changes.recv().await.unwrap();
        let second = changes.recv().await.unwrap();
        let entities = [first.entity, second.entity];
        assert!(entities.contains(&Entity::Sales));
        assert!(entities.contains(&Entity::CatalogItems));
    }

    #[tokio::test]
    async fn test_stock_adjustment_validation() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        assert!(matches!(
            add_catalog_stock(&db, &item.id, 0).await.unwrap_err(),
            WorkflowError::Domain(CoreError::Validation(_))
        ));
        assert!(matches!(
            remove_catalog_stock(&db, &item.id, -4).await.unwrap_err(),
            WorkflowError::Domain(CoreError::Validation(_))
        ));

        let after = db.catalog().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(after.current_stock, 10);
    }

    #[tokio::test]
    async fn test_stock_adjustment_round_trip() {
        let db = test_db().await;
        let item = db.catalog().insert(canonical_item()).await.unwrap();

        let up = add_catalog_stock(&db, &item.id, 5).await.unwrap();
        assert_eq!(up.current_stock, 15);

        let down = remove_catalog_stock(&db, &item.id, 40).await.unwrap();
        assert_eq!(down.current_stock, 0);
    }
}
