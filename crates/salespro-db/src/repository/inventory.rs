//! # Inventory Repository
//!
//! Record-store operations for raw-material inventory items. Same CRUD shape
//! as the catalog repository, without the built-in fallback; the low-stock
//! threshold here is the per-item `min_stock_level`, not the fixed catalog
//! constant.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeNotifier, Entity};
use salespro_core::{InventoryItem, InventoryItemPatch, NewInventoryItem};

/// Repository for inventory item store operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
    changes: ChangeNotifier,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool, changes: ChangeNotifier) -> Self {
        InventoryRepository { pool, changes }
    }

    /// Lists all inventory items, newest first.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, sku, unit_cost_cents, current_stock,
                   min_stock_level, category, created_at, updated_at
            FROM inventory_items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an inventory item by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, name, sku, unit_cost_cents, current_stock,
                   min_stock_level, category, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new inventory item. Returns the full row.
    pub async fn insert(&self, new: NewInventoryItem) -> DbResult<InventoryItem> {
        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            sku: new.sku,
            unit_cost_cents: new.unit_cost_cents,
            current_stock: new.current_stock.max(0),
            min_stock_level: new.min_stock_level.max(0),
            category: new.category,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, sku = %item.sku, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, name, sku, unit_cost_cents, current_stock,
                min_stock_level, category, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.unit_cost_cents)
        .bind(item.current_stock)
        .bind(item.min_stock_level)
        .bind(&item.category)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        self.changes.notify(Entity::InventoryItems);
        Ok(item)
    }

    /// Applies a partial patch to an inventory item. Returns the updated row.
    pub async fn update(&self, id: &str, patch: InventoryItemPatch) -> DbResult<InventoryItem> {
        debug!(id = %id, "Updating inventory item");

        let now = Utc::now();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items SET
                name = COALESCE(?2, name),
                sku = COALESCE(?3, sku),
                unit_cost_cents = COALESCE(?4, unit_cost_cents),
                current_stock = MAX(COALESCE(?5, current_stock), 0),
                min_stock_level = MAX(COALESCE(?6, min_stock_level), 0),
                category = COALESCE(?7, category),
                updated_at = ?8
            WHERE id = ?1
            RETURNING id, name, sku, unit_cost_cents, current_stock,
                      min_stock_level, category, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.sku)
        .bind(patch.unit_cost_cents)
        .bind(patch.current_stock)
        .bind(patch.min_stock_level)
        .bind(patch.category)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Inventory item", id))?;

        self.changes.notify(Entity::InventoryItems);
        Ok(item)
    }

    /// Deletes an inventory item.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory item", id));
        }

        self.changes.notify(Entity::InventoryItems);
        Ok(())
    }

    /// Adds stock to an item. No upper bound.
    pub async fn add_stock(&self, id: &str, amount: i64) -> DbResult<InventoryItem> {
        debug!(id = %id, amount = %amount, "Adding inventory stock");

        let now = Utc::now();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items SET
                current_stock = current_stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, sku, unit_cost_cents, current_stock,
                      min_stock_level, category, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Inventory item", id))?;

        self.changes.notify(Entity::InventoryItems);
        Ok(item)
    }

    /// Removes stock from an item, clamping at zero.
    pub async fn remove_stock(&self, id: &str, amount: i64) -> DbResult<InventoryItem> {
        debug!(id = %id, amount = %amount, "Removing inventory stock");

        let now = Utc::now();

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items SET
                current_stock = MAX(current_stock - ?2, 0),
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, sku, unit_cost_cents, current_stock,
                      min_stock_level, category, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Inventory item", id))?;

        self.changes.notify(Entity::InventoryItems);
        Ok(item)
    }

    /// Counts inventory items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_item(sku: &str, stock: i64, min: i64) -> NewInventoryItem {
        NewInventoryItem {
            name: format!("Material {sku}"),
            sku: sku.to_string(),
            unit_cost_cents: 150,
            current_stock: stock,
            min_stock_level: min,
            category: Some("Raw".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_list_round_trip() {
        let db = test_db().await;
        let repo = db.inventory();

        let inserted = repo.insert(new_item("FL-001", 40, 10)).await.unwrap();
        let items = repo.list().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, inserted.id);
        assert_eq!(items[0].min_stock_level, 10);
    }

    #[tokio::test]
    async fn test_patch_min_stock_level() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = repo.insert(new_item("SU-002", 3, 5)).await.unwrap();
        let patched = repo
            .update(
                &item.id,
                InventoryItemPatch {
                    min_stock_level: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.min_stock_level, 2);
        assert!(!patched.is_low_stock());
    }

    #[tokio::test]
    async fn test_stock_adjustments() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = repo.insert(new_item("EG-003", 10, 5)).await.unwrap();

        let up = repo.add_stock(&item.id, 15).await.unwrap();
        assert_eq!(up.current_stock, 25);

        let down = repo.remove_stock(&item.id, 100).await.unwrap();
        assert_eq!(down.current_stock, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        assert!(matches!(
            db.inventory().delete("nope").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
