//! # Checkout Repository
//!
//! Database operations for the cart table (`checkout`).
//!
//! ## Mutate + Re-read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Transaction Per Mutation                         │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  INSERT ... ON CONFLICT / UPDATE / DELETE   ← the mutation             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  SELECT id, item_id, count ORDER BY id      ← full table re-read       │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT ──► Vec<CartItem> handed back to the caller's mirror           │
//! │                                                                         │
//! │  Any failure rolls back: table and mirror both keep the prior state.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row States
//! A product is either absent (no row) or present with `count >= 1`.
//! Decrementing a row at 1 deletes it; a zero-count row never exists.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use shopfront_core::{CartItem, ProductId};

const SELECT_ALL: &str = "SELECT id, item_id, count FROM checkout ORDER BY id";

/// A single cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Clear,
}

impl Mutation {
    fn name(&self) -> &'static str {
        match self {
            Mutation::Add(_) => "add",
            Mutation::Increase(_) => "increase",
            Mutation::Decrease(_) => "decrease",
            Mutation::Remove(_) => "remove",
            Mutation::Clear => "clear",
        }
    }

    /// Runs the statements for this mutation. Returns rows affected.
    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> DbResult<u64> {
        let affected = match *self {
            Mutation::Add(item_id) => {
                // Upsert: a second add bumps the count instead of tripping UNIQUE
                sqlx::query(
                    r#"
                    INSERT INTO checkout (item_id, count) VALUES (?1, 1)
                    ON CONFLICT(item_id) DO UPDATE SET count = count + 1
                    "#,
                )
                .bind(item_id)
                .execute(&mut **tx)
                .await?
                .rows_affected()
            }

            Mutation::Increase(item_id) => {
                sqlx::query("UPDATE checkout SET count = count + 1 WHERE item_id = ?1")
                    .bind(item_id)
                    .execute(&mut **tx)
                    .await?
                    .rows_affected()
            }

            Mutation::Decrease(item_id) => {
                let deleted =
                    sqlx::query("DELETE FROM checkout WHERE item_id = ?1 AND count <= 1")
                        .bind(item_id)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected();

                if deleted > 0 {
                    deleted
                } else {
                    sqlx::query("UPDATE checkout SET count = count - 1 WHERE item_id = ?1")
                        .bind(item_id)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected()
                }
            }

            Mutation::Remove(item_id) => sqlx::query("DELETE FROM checkout WHERE item_id = ?1")
                .bind(item_id)
                .execute(&mut **tx)
                .await?
                .rows_affected(),

            Mutation::Clear => sqlx::query("DELETE FROM checkout")
                .execute(&mut **tx)
                .await?
                .rows_affected(),
        };

        Ok(affected)
    }
}

/// Repository for the `checkout` table.
///
/// Every mutating method returns the full table contents as read inside the
/// same transaction, ready to replace an in-memory mirror wholesale.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.checkout();
///
/// let rows = repo.add(7).await?;      // [CartItem { item_id: 7, count: 1, .. }]
/// let rows = repo.add(7).await?;      // count 2, still one row
/// let rows = repo.decrease(7).await?; // count 1
/// let rows = repo.decrease(7).await?; // []
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: SqlitePool,
}

impl CheckoutRepository {
    /// Creates a new CheckoutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutRepository { pool }
    }

    /// Reads every row, ordered by row id (insertion order).
    pub async fn list_all(&self) -> DbResult<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartItem>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Loaded checkout table");
        Ok(rows)
    }

    /// Stored count for a product, 0 when it has no row.
    pub async fn count(&self, item_id: ProductId) -> DbResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT count FROM checkout WHERE item_id = ?1")
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(count.unwrap_or(0))
    }

    /// Looks up the row for a product.
    pub async fn get_by_item_id(&self, item_id: ProductId) -> DbResult<CartItem> {
        sqlx::query_as::<_, CartItem>(
            "SELECT id, item_id, count FROM checkout WHERE item_id = ?1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("CartItem", item_id))
    }

    /// Adds one unit: inserts a row with count 1, or increments an existing row.
    pub async fn add(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        self.mutate(Mutation::Add(item_id)).await
    }

    /// Increments an existing row. No-op when the product has no row.
    pub async fn increase(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        self.mutate(Mutation::Increase(item_id)).await
    }

    /// Decrements a row, deleting it when the count is 1. No-op when absent.
    pub async fn decrease(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        self.mutate(Mutation::Decrease(item_id)).await
    }

    /// Deletes the row for a product regardless of count. No-op when absent.
    pub async fn remove(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        self.mutate(Mutation::Remove(item_id)).await
    }

    /// Deletes every row.
    pub async fn clear(&self) -> DbResult<Vec<CartItem>> {
        self.mutate(Mutation::Clear).await
    }

    async fn mutate(&self, mutation: Mutation) -> DbResult<Vec<CartItem>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let affected = mutation.apply(&mut tx).await?;

        let rows = sqlx::query_as::<_, CartItem>(SELECT_ALL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            op = mutation.name(),
            ?mutation,
            affected,
            rows = rows.len(),
            "Checkout mutation committed"
        );

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CheckoutRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().checkout()
    }

    fn pairs(rows: &[CartItem]) -> Vec<(i64, i64)> {
        rows.iter().map(|r| (r.item_id, r.count)).collect()
    }

    #[tokio::test]
    async fn test_add_twice_upserts() {
        let repo = repo().await;

        repo.add(3).await.unwrap();
        let rows = repo.add(3).await.unwrap();

        assert_eq!(pairs(&rows), vec![(3, 2)]);
        assert_eq!(repo.count(3).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_decrease_at_one_deletes_row() {
        let repo = repo().await;

        repo.add(7).await.unwrap();
        let rows = repo.decrease(7).await.unwrap();

        assert!(rows.is_empty());
        assert_eq!(repo.count(7).await.unwrap(), 0);
        assert!(matches!(
            repo.get_by_item_id(7).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_absent_mutations_are_noops() {
        let repo = repo().await;
        repo.add(1).await.unwrap();

        assert_eq!(pairs(&repo.increase(99).await.unwrap()), vec![(1, 1)]);
        assert_eq!(pairs(&repo.decrease(99).await.unwrap()), vec![(1, 1)]);
        assert_eq!(pairs(&repo.remove(99).await.unwrap()), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn test_remove_ignores_count() {
        let repo = repo().await;
        for _ in 0..5 {
            repo.add(4).await.unwrap();
        }

        assert!(repo.remove(4).await.unwrap().is_empty());
        assert!(repo.remove(4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rows_keep_insertion_order() {
        let repo = repo().await;

        repo.add(9).await.unwrap();
        repo.add(2).await.unwrap();
        let rows = repo.add(9).await.unwrap();

        assert_eq!(pairs(&rows), vec![(9, 2), (2, 1)]);
        assert!(rows[0].id < rows[1].id);
    }

    #[tokio::test]
    async fn test_returned_rows_match_reread() {
        let repo = repo().await;

        repo.add(1).await.unwrap();
        repo.add(2).await.unwrap();
        let returned = repo.decrease(1).await.unwrap();

        assert_eq!(returned, repo.list_all().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = repo().await;
        repo.add(1).await.unwrap();
        repo.add(2).await.unwrap();

        assert!(repo.clear().await.unwrap().is_empty());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_count_row_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = sqlx::query("INSERT INTO checkout (item_id, count) VALUES (5, 0)")
            .execute(db.pool())
            .await
            .map_err(DbError::from)
            .unwrap_err();

        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_closed_pool_fails_without_partial_write() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.checkout();
        db.close().await;

        assert!(repo.add(1).await.is_err());
    }
}
