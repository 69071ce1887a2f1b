//! # Cart State
//!
//! In-memory mirror of the `checkout` table.
//!
//! ## Thread Safety
//! Mutations take a `tokio::sync::Mutex` so a mutation and the mirror
//! refresh that follows it are never interleaved with another mutation.
//! Reads go straight to the `watch` channel and never wait on the lock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  User Action          CartState               Table / Mirror            │
//! │  ───────────          ─────────               ──────────────            │
//! │                                                                         │
//! │  Add to cart ───────► add_to_cart(id) ──────► upsert + re-read         │
//! │  + button ──────────► increase(id) ─────────► count+1 + re-read        │
//! │  − button ──────────► decrease(id) ─────────► count−1 / delete         │
//! │  Remove ────────────► remove(id) ───────────► delete + re-read         │
//! │  Pull to refresh ───► reload() ─────────────► re-read                  │
//! │  Badge / stepper ───► count(id) ────────────► (mirror only)            │
//! │                                                                         │
//! │  The mirror is replaced only after the transaction commits.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use shopfront_core::cart::count_of;
use shopfront_core::{CartItem, ProductId};
use shopfront_db::{Database, DbResult};

/// Cart mirror backed by the cart database.
#[derive(Debug)]
pub struct CartState {
    db: Database,
    mirror: watch::Sender<Vec<CartItem>>,
    write_lock: Mutex<()>,
}

impl CartState {
    /// Creates the state and fills the mirror from the table.
    pub async fn load(db: Database) -> DbResult<Self> {
        let rows = db.checkout().list_all().await?;
        info!(rows = rows.len(), "Cart loaded");

        let (mirror, _) = watch::channel(rows);
        Ok(CartState {
            db,
            mirror,
            write_lock: Mutex::new(()),
        })
    }

    /// Adds one unit of a product (insert or increment).
    pub async fn add_to_cart(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().add(item_id).await?;
        Ok(self.publish(rows))
    }

    /// Increments a product already in the cart. No-op when absent.
    pub async fn increase(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().increase(item_id).await?;
        Ok(self.publish(rows))
    }

    /// Decrements a product, removing it at zero. No-op when absent.
    pub async fn decrease(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().decrease(item_id).await?;
        Ok(self.publish(rows))
    }

    /// Removes a product whatever its count. No-op when absent.
    pub async fn remove(&self, item_id: ProductId) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().remove(item_id).await?;
        Ok(self.publish(rows))
    }

    /// Empties the cart.
    pub async fn clear(&self) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().clear().await?;
        Ok(self.publish(rows))
    }

    /// Re-reads the table into the mirror.
    pub async fn reload(&self) -> DbResult<Vec<CartItem>> {
        let _guard = self.write_lock.lock().await;
        let rows = self.db.checkout().list_all().await?;
        Ok(self.publish(rows))
    }

    /// Deletes the database file. The mirror is emptied and every later
    /// operation fails with a storage error.
    pub async fn drop_database(&self) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;
        self.db.drop_database().await?;
        self.publish(Vec::new());
        Ok(())
    }

    /// Units of a product in the cart, 0 when absent.
    pub fn count(&self, item_id: ProductId) -> i64 {
        count_of(&self.mirror.borrow(), item_id)
    }

    /// Current mirror contents.
    pub fn items(&self) -> Vec<CartItem> {
        self.mirror.borrow().clone()
    }

    /// Receiver notified whenever the mirror changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.mirror.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    fn publish(&self, rows: Vec<CartItem>) -> Vec<CartItem> {
        debug!(rows = rows.len(), "Cart mirror refreshed");
        self.mirror.send_if_modified(|current| {
            if *current == rows {
                return false;
            }
            *current = rows.clone();
            true
        });
        rows
    }
}
