//! # State Module
//!
//! The `Storefront`: the one object the presentation layer talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run() builds one Storefront and passes it to every command handler.   │
//! │                              │                                          │
//! │          ┌───────────────────┼───────────────────┐                     │
//! │          ▼                   ▼                   ▼                      │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐            │
//! │  │ CatalogState │   │  CartState   │   │  Notices         │            │
//! │  │              │   │              │   │                  │            │
//! │  │ watch<       │   │ watch<       │   │ broadcast<       │            │
//! │  │  Snapshot>   │   │  Vec<Item>>  │   │  Notice>         │            │
//! │  │ + tickets    │   │ + Mutex      │   │                  │            │
//! │  └──────────────┘   └──────────────┘   └──────────────────┘            │
//! │                                                                         │
//! │  Every fallible operation returns Result<_, ApiError> AND, on error,   │
//! │  logs it and broadcasts a Notice. Mirrors keep their last good value.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod notice;

pub use cart::CartState;
pub use catalog::{CatalogState, FetchOutcome};
pub use notice::Notice;

use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::error::ApiError;
use shopfront_catalog::{CatalogClient, ShopfrontConfig};
use shopfront_core::cart::cart_lines;
use shopfront_core::{CartItem, CartLine, CartTotals, CatalogSnapshot, Product, ProductId};
use shopfront_db::{Database, DbConfig};

/// Notices buffered for slow subscribers before the oldest are dropped.
const NOTICE_CAPACITY: usize = 64;

/// Catalog + cart store.
#[derive(Debug)]
pub struct Storefront {
    catalog: CatalogState,
    cart: CartState,
    notices: broadcast::Sender<Notice>,
}

impl Storefront {
    /// Builds a store from an open database and a catalog client, loading the
    /// cart mirror from the table.
    pub async fn new(db: Database, client: CatalogClient) -> Result<Self, ApiError> {
        let cart = CartState::load(db).await?;
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Ok(Storefront {
            catalog: CatalogState::new(client),
            cart,
            notices,
        })
    }

    /// Opens the configured database and catalog.
    pub async fn open(config: &ShopfrontConfig) -> Result<Self, ApiError> {
        let db_path = config
            .database_path()
            .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ApiError::storage(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        info!(path = %db_path.display(), "Opening cart database");

        let db = Database::new(DbConfig::new(db_path)).await?;
        let client = CatalogClient::new(&config.catalog)?;

        Self::new(db, client).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetches the catalog. On failure the previous product list stays.
    pub async fn fetch_products(&self) -> Result<FetchOutcome, ApiError> {
        let result = self.catalog.fetch_products().await.map_err(ApiError::from);
        self.report("fetch_products", result)
    }

    /// Current product list.
    pub fn products(&self) -> Vec<Product> {
        self.catalog.products()
    }

    /// Current product list with its fetch time.
    pub fn catalog_snapshot(&self) -> CatalogSnapshot {
        self.catalog.snapshot()
    }

    pub fn subscribe_products(&self) -> watch::Receiver<CatalogSnapshot> {
        self.catalog.subscribe()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a product (insert, or increment if present).
    pub async fn add_to_cart(&self, item_id: ProductId) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.add_to_cart(item_id).await.map_err(ApiError::from);
        self.report("add_to_cart", result)
    }

    /// Increments a product in the cart. No-op when absent.
    pub async fn increase(&self, item_id: ProductId) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.increase(item_id).await.map_err(ApiError::from);
        self.report("increase", result)
    }

    /// Decrements a product; at 1 the row is removed. No-op when absent.
    pub async fn decrease(&self, item_id: ProductId) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.decrease(item_id).await.map_err(ApiError::from);
        self.report("decrease", result)
    }

    /// Removes a product from the cart. No-op when absent.
    pub async fn remove(&self, item_id: ProductId) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.remove(item_id).await.map_err(ApiError::from);
        self.report("remove", result)
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.clear().await.map_err(ApiError::from);
        self.report("clear", result)
    }

    /// Re-reads the cart table into the mirror.
    pub async fn reload(&self) -> Result<Vec<CartItem>, ApiError> {
        let result = self.cart.reload().await.map_err(ApiError::from);
        self.report("reload", result)
    }

    /// Deletes the cart database. The store cannot be used afterwards.
    pub async fn drop_database(&self) -> Result<(), ApiError> {
        let result = self.cart.drop_database().await.map_err(ApiError::from);
        self.report("drop_database", result)
    }

    /// Units of a product in the cart, 0 when absent. Never fails.
    pub fn count(&self, item_id: ProductId) -> i64 {
        self.cart.count(item_id)
    }

    /// Current cart rows.
    pub fn cart(&self) -> Vec<CartItem> {
        self.cart.items()
    }

    pub fn subscribe_cart(&self) -> watch::Receiver<Vec<CartItem>> {
        self.cart.subscribe()
    }

    // =========================================================================
    // Derived
    // =========================================================================

    /// Cart rows joined with the catalog. Rows without a product are skipped.
    pub fn cart_lines(&self) -> Vec<CartLine> {
        cart_lines(&self.products(), &self.cart())
    }

    /// Line count, unit count and total price of the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.products(), &self.cart())
    }

    // =========================================================================
    // Notices
    // =========================================================================

    /// Receiver for error notices. Only notices sent after subscribing arrive.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    fn report<T>(
        &self,
        operation: &'static str,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if let Err(err) = &result {
            warn!(operation, code = ?err.code, message = %err.message, "Operation failed");
            // No subscribers is fine
            let _ = self.notices.send(Notice::new(operation, err));
        }
        result
    }
}
