//! # Sale Repository
//!
//! Record-store reads for sales. Sales are immutable: rows are created by
//! the sale workflow (see [`crate::workflow`]) inside its transaction, and
//! this repository only lists and fetches them - there is no update or
//! delete surface.

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::notify::ChangeNotifier;
use salespro_core::Sale;

/// Repository for sale store operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
    // Sales are insert-only and the insert lives in the workflow, so this
    // repository never publishes; the handle keeps the constructor uniform.
    #[allow(dead_code)]
    changes: ChangeNotifier,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool, changes: ChangeNotifier) -> Self {
        SaleRepository { pool, changes }
    }

    /// Lists all sales, newest business date first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, item_id, item_name, quantity_sold,
                   retail_price_cents, unit_cost_cents,
                   revenue_cents, profit_cents, date, created_at
            FROM sales
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sales of one catalog item, newest first.
    ///
    /// Feeds the per-item sales statistics on the catalog detail view.
    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, item_id, item_name, quantity_sold,
                   retail_price_cents, unit_cost_cents,
                   revenue_cents, profit_cents, date, created_at
            FROM sales
            WHERE item_id = ?1
            ORDER BY date DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets a sale by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, item_id, item_name, quantity_sold,
                   retail_price_cents, unit_cost_cents,
                   revenue_cents, profit_cents, date, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// The interesting sale behavior (stock checks, snapshots, arithmetic) is
// covered by the workflow tests; these only pin the read surface.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::workflow;
    use salespro_core::NewCatalogItem;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_item(name: &str, stock: i64) -> NewCatalogItem {
        NewCatalogItem {
            name: name.to_string(),
            sku: None,
            retail_price_cents: 10000,
            unit_cost_cents: 6000,
            current_stock: stock,
            category: None,
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_list_and_filter_by_item() {
        let db = test_db().await;
        let a = db.catalog().insert(new_item("A", 10)).await.unwrap();
        let b = db.catalog().insert(new_item("B", 10)).await.unwrap();

        workflow::record_sale(&db, &a.id, 2).await.unwrap();
        workflow::record_sale(&db, &b.id, 1).await.unwrap();
        workflow::record_sale(&db, &a.id, 3).await.unwrap();

        let repo = db.sales();
        assert_eq!(repo.list().await.unwrap().len(), 3);
        assert_eq!(repo.count().await.unwrap(), 3);

        let for_a = repo.list_for_item(&a.id).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|s| s.item_id == a.id));
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let db = test_db().await;
        let item = db.catalog().insert(new_item("A", 10)).await.unwrap();

        let sale = workflow::record_sale(&db, &item.id, 2).await.unwrap();
        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();

        assert_eq!(fetched.item_name, "A");
        assert_eq!(fetched.quantity_sold, 2);
        assert_eq!(fetched.revenue_cents, sale.revenue_cents);
        assert_eq!(fetched.date, sale.date);
    }
}
