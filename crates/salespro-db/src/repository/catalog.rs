//! # Catalog Repository
//!
//! Record-store operations for catalog items.
//!
//! ## Key Operations
//! - List (newest first), with the built-in fallback variant
//! - CRUD with partial patches
//! - Atomic stock adjustments
//!
//! ## Fallback Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      list_or_default()                                  │
//! │                                                                         │
//! │  SELECT ... ──► rows        ──► CatalogSource::Store                   │
//! │             ──► empty       ──► CatalogSource::BuiltIn                 │
//! │             ──► store error ──► CatalogSource::BuiltIn (warn-logged)   │
//! │                                                                         │
//! │  The UI always has something to display, even before the store is      │
//! │  seeded; write operations never fall back and always propagate.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeNotifier, Entity};
use salespro_core::{CatalogItem, CatalogItemPatch, CatalogListing, NewCatalogItem};

/// Repository for catalog item store operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.catalog();
///
/// let listing = repo.list_or_default().await;
/// let item = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
    changes: ChangeNotifier,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool, changes: ChangeNotifier) -> Self {
        CatalogRepository { pool, changes }
    }

    /// Lists all catalog items, newest first.
    ///
    /// Store failures propagate; use [`list_or_default`](Self::list_or_default)
    /// on the read path that must never come back empty-handed.
    pub async fn list(&self) -> DbResult<Vec<CatalogItem>> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, name, sku, retail_price_cents, unit_cost_cents,
                   current_stock, category, unit, created_at, updated_at
            FROM catalog_items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists catalog items with the built-in fallback.
    ///
    /// A failed or empty read yields the built-in sample catalog, tagged so
    /// the caller can tell the branches apart. This is the one read that
    /// swallows store errors (after logging them).
    pub async fn list_or_default(&self) -> CatalogListing {
        match self.list().await {
            Ok(items) if !items.is_empty() => CatalogListing::from_store(items),
            Ok(_) => {
                debug!("catalog table empty, serving built-in list");
                CatalogListing::built_in(Utc::now())
            }
            Err(e) => {
                warn!(error = %e, "catalog read failed, serving built-in list");
                CatalogListing::built_in(Utc::now())
            }
        }
    }

    /// Gets a catalog item by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(CatalogItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, name, sku, retail_price_cents, unit_cost_cents,
                   current_stock, category, unit, created_at, updated_at
            FROM catalog_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new catalog item.
    ///
    /// Id and timestamps are generated here; manually supplied stock is
    /// clamped at zero. Returns the full row.
    pub async fn insert(&self, new: NewCatalogItem) -> DbResult<CatalogItem> {
        let now = Utc::now();
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            sku: new.sku,
            retail_price_cents: new.retail_price_cents,
            unit_cost_cents: new.unit_cost_cents,
            current_stock: new.current_stock.max(0),
            category: new.category,
            unit: new.unit,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, name = %item.name, "Inserting catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (
                id, name, sku, retail_price_cents, unit_cost_cents,
                current_stock, category, unit, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.sku)
        .bind(item.retail_price_cents)
        .bind(item.unit_cost_cents)
        .bind(item.current_stock)
        .bind(&item.category)
        .bind(&item.unit)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        self.changes.notify(Entity::CatalogItems);
        Ok(item)
    }

    /// Applies a partial patch to a catalog item.
    ///
    /// Missing patch fields leave the column unchanged; a patched stock
    /// level is clamped at zero. Returns the updated row.
    pub async fn update(&self, id: &str, patch: CatalogItemPatch) -> DbResult<CatalogItem> {
        debug!(id = %id, "Updating catalog item");

        let now = Utc::now();

        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items SET
                name = COALESCE(?2, name),
                sku = COALESCE(?3, sku),
                retail_price_cents = COALESCE(?4, retail_price_cents),
                unit_cost_cents = COALESCE(?5, unit_cost_cents),
                current_stock = MAX(COALESCE(?6, current_stock), 0),
                category = COALESCE(?7, category),
                unit = COALESCE(?8, unit),
                updated_at = ?9
            WHERE id = ?1
            RETURNING id, name, sku, retail_price_cents, unit_cost_cents,
                      current_stock, category, unit, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.sku)
        .bind(patch.retail_price_cents)
        .bind(patch.unit_cost_cents)
        .bind(patch.current_stock)
        .bind(patch.category)
        .bind(patch.unit)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Catalog item", id))?;

        self.changes.notify(Entity::CatalogItems);
        Ok(item)
    }

    /// Deletes a catalog item.
    ///
    /// Hard delete; historical sales keep their name/price snapshot.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting catalog item");

        let result = sqlx::query("DELETE FROM catalog_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        self.changes.notify(Entity::CatalogItems);
        Ok(())
    }

    /// Adds stock to an item. No upper bound.
    ///
    /// Expressed as a single atomic update, not fetch-then-write, so
    /// concurrent adjustments cannot lose each other's deltas.
    pub async fn add_stock(&self, id: &str, amount: i64) -> DbResult<CatalogItem> {
        debug!(id = %id, amount = %amount, "Adding catalog stock");

        let now = Utc::now();

        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items SET
                current_stock = current_stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, sku, retail_price_cents, unit_cost_cents,
                      current_stock, category, unit, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Catalog item", id))?;

        self.changes.notify(Entity::CatalogItems);
        Ok(item)
    }

    /// Removes stock from an item, clamping at zero.
    ///
    /// Removing more than is on hand leaves the stock at exactly 0.
    pub async fn remove_stock(&self, id: &str, amount: i64) -> DbResult<CatalogItem> {
        debug!(id = %id, amount = %amount, "Removing catalog stock");

        let now = Utc::now();

        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            UPDATE catalog_items SET
                current_stock = MAX(current_stock - ?2, 0),
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, sku, retail_price_cents, unit_cost_cents,
                      current_stock, category, unit, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Catalog item", id))?;

        self.changes.notify(Entity::CatalogItems);
        Ok(item)
    }

    /// Counts catalog items (for diagnostics and the dashboard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
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
    use salespro_core::CatalogSource;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_item(name: &str, stock: i64) -> NewCatalogItem {
        NewCatalogItem {
            name: name.to_string(),
            sku: Some(format!("{}-1", name.to_uppercase())),
            retail_price_cents: 9999,
            unit_cost_cents: 4500,
            current_stock: stock,
            category: Some("Electronics".to_string()),
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.catalog();

        let inserted = repo.insert(new_item("Headphones", 25)).await.unwrap();
        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Headphones");
        assert_eq!(fetched.sku.as_deref(), Some("HEADPHONES-1"));
        assert_eq!(fetched.retail_price_cents, 9999);
        assert_eq!(fetched.current_stock, 25);
        assert_eq!(fetched.created_at, inserted.created_at);
    }

    #[tokio::test]
    async fn test_insert_clamps_negative_stock() {
        let db = test_db().await;
        let repo = db.catalog();

        let item = repo.insert(new_item("Speaker", -3)).await.unwrap();
        assert_eq!(item.current_stock, 0);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = test_db().await;
        let repo = db.catalog();

        repo.insert(new_item("First", 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.insert(new_item("Second", 1)).await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Second");
        assert_eq!(items[1].name, "First");
    }

    #[tokio::test]
    async fn test_list_or_default_falls_back_when_empty() {
        let db = test_db().await;
        let listing = db.catalog().list_or_default().await;

        assert_eq!(listing.source, CatalogSource::BuiltIn);
        assert!(!listing.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_or_default_uses_store_once_seeded() {
        let db = test_db().await;
        let repo = db.catalog();

        repo.insert(new_item("Real", 5)).await.unwrap();
        let listing = repo.list_or_default().await;

        assert_eq!(listing.source, CatalogSource::Store);
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].name, "Real");
    }

    #[tokio::test]
    async fn test_partial_patch_leaves_other_fields() {
        let db = test_db().await;
        let repo = db.catalog();

        let item = repo.insert(new_item("Case", 50)).await.unwrap();
        let patched = repo
            .update(
                &item.id,
                CatalogItemPatch {
                    retail_price_cents: Some(2499),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.retail_price_cents, 2499);
        assert_eq!(patched.name, "Case");
        assert_eq!(patched.current_stock, 50);
        assert!(patched.updated_at >= item.updated_at);
    }

    #[tokio::test]
    async fn test_patch_missing_item_is_not_found() {
        let db = test_db().await;
        let err = db
            .catalog()
            .update("missing-id", CatalogItemPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.catalog();

        let item = repo.insert(new_item("Doomed", 1)).await.unwrap();
        repo.delete(&item.id).await.unwrap();

        assert!(repo.get_by_id(&item.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&item.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_add_stock_has_no_upper_bound() {
        let db = test_db().await;
        let repo = db.catalog();

        let item = repo.insert(new_item("Bulk", 10)).await.unwrap();
        let updated = repo.add_stock(&item.id, 1_000_000).await.unwrap();
        assert_eq!(updated.current_stock, 1_000_010);
    }

    #[tokio::test]
    async fn test_remove_stock_clamps_at_zero() {
        let db = test_db().await;
        let repo = db.catalog();

        let item = repo.insert(new_item("Scarce", 3)).await.unwrap();
        let updated = repo.remove_stock(&item.id, 99).await.unwrap();
        assert_eq!(updated.current_stock, 0);
    }

    #[tokio::test]
    async fn test_mutations_publish_change_events() {
        let db = test_db().await;
        let mut changes = db.subscribe_changes();

        db.catalog().insert(new_item("Notify", 1)).await.unwrap();

        let event = changes.recv().await.unwrap();
        assert_eq!(event.entity, Entity::CatalogItems);
    }
}
