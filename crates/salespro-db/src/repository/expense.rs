//! # Expense Repository
//!
//! Record-store operations for logged expenses.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeNotifier, Entity};
use salespro_core::{Expense, ExpensePatch, NewExpense};

/// Repository for expense store operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
    changes: ChangeNotifier,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool, changes: ChangeNotifier) -> Self {
        ExpenseRepository { pool, changes }
    }

    /// Lists all expenses, newest business date first.
    pub async fn list(&self) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, category, description, amount_cents, date, created_at
            FROM expenses
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Gets an expense by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, category, description, amount_cents, date, created_at
            FROM expenses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Logs a new expense. The business date defaults to now when omitted.
    pub async fn insert(&self, new: NewExpense) -> DbResult<Expense> {
        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            category: new.category,
            description: new.description,
            amount_cents: new.amount_cents,
            date: new.date.unwrap_or(now),
            created_at: now,
        };

        debug!(id = %expense.id, category = %expense.category, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (id, category, description, amount_cents, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(expense.date)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        self.changes.notify(Entity::Expenses);
        Ok(expense)
    }

    /// Applies a partial patch to an expense. Returns the updated row.
    pub async fn update(&self, id: &str, patch: ExpensePatch) -> DbResult<Expense> {
        debug!(id = %id, "Updating expense");

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses SET
                category = COALESCE(?2, category),
                description = COALESCE(?3, description),
                amount_cents = COALESCE(?4, amount_cents),
                date = COALESCE(?5, date)
            WHERE id = ?1
            RETURNING id, category, description, amount_cents, date, created_at
            "#,
        )
        .bind(id)
        .bind(patch.category)
        .bind(patch.description)
        .bind(patch.amount_cents)
        .bind(patch.date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Expense", id))?;

        self.changes.notify(Entity::Expenses);
        Ok(expense)
    }

    /// Deletes an expense.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        self.changes.notify(Entity::Expenses);
        Ok(())
    }

    /// Counts expenses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
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
    use chrono::TimeZone;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_expense(category: &str, amount: i64) -> NewExpense {
        NewExpense {
            category: category.to_string(),
            description: format!("{category} bill"),
            amount_cents: amount,
            date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_defaults_date_to_now() {
        let db = test_db().await;
        let repo = db.expenses();

        let expense = repo.insert(new_expense("rent", 50000)).await.unwrap();
        assert_eq!(expense.date, expense.created_at);
    }

    #[tokio::test]
    async fn test_explicit_date_round_trips() {
        let db = test_db().await;
        let repo = db.expenses();

        let date = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
        let expense = repo
            .insert(NewExpense {
                date: Some(date),
                ..new_expense("utilities", 3000)
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(&expense.id).await.unwrap().unwrap();
        assert_eq!(fetched.date, date);
        assert_eq!(fetched.amount_cents, 3000);
    }

    #[tokio::test]
    async fn test_list_is_newest_date_first() {
        let db = test_db().await;
        let repo = db.expenses();

        let old = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();

        repo.insert(NewExpense {
            date: Some(old),
            ..new_expense("rent", 100)
        })
        .await
        .unwrap();
        repo.insert(NewExpense {
            date: Some(new),
            ..new_expense("rent", 200)
        })
        .await
        .unwrap();

        let expenses = repo.list().await.unwrap();
        assert_eq!(expenses[0].amount_cents, 200);
        assert_eq!(expenses[1].amount_cents, 100);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let db = test_db().await;
        let repo = db.expenses();

        let expense = repo.insert(new_expense("misc", 1000)).await.unwrap();
        let patched = repo
            .update(
                &expense.id,
                ExpensePatch {
                    amount_cents: Some(1500),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.amount_cents, 1500);
        assert_eq!(patched.category, "misc");

        repo.delete(&expense.id).await.unwrap();
        assert!(repo.get_by_id(&expense.id).await.unwrap().is_none());
    }
}
