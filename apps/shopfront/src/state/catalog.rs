//! # Catalog State
//!
//! Holds the last successfully fetched product list and publishes it to
//! subscribers.
//!
//! ## Fetch Sequencing (last-started-wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Overlapping Fetches                                  │
//! │                                                                         │
//! │  fetch #1 ──────────────────────────────────────────► done (stale)     │
//! │        fetch #2 ─────────────► done, applied (2 > 0)                   │
//! │                                                                         │
//! │  #1 finishes last but started first: 1 < 2 already applied, dropped.   │
//! │                                                                         │
//! │  Errors never touch the snapshot: the previous list stays visible.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use shopfront_catalog::{CatalogClient, CatalogError};
use shopfront_core::{CatalogSnapshot, Product};

/// What happened to a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the product list.
    Applied { count: usize },

    /// A fetch started later had already been applied; this one was dropped.
    Superseded,
}

/// Product list mirror with ticketed fetches.
#[derive(Debug)]
pub struct CatalogState {
    client: CatalogClient,
    snapshot: watch::Sender<CatalogSnapshot>,
    /// Ticket handed to the next fetch.
    issued: AtomicU64,
    /// Ticket of the response currently shown. Only written while the watch
    /// channel's write lock is held.
    applied: AtomicU64,
}

impl CatalogState {
    /// Creates an empty catalog mirror.
    pub fn new(client: CatalogClient) -> Self {
        let (snapshot, _) = watch::channel(CatalogSnapshot::default());
        CatalogState {
            client,
            snapshot,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Fetches the catalog and replaces the product list wholesale.
    ///
    /// On error the current list is left as it was.
    pub async fn fetch_products(&self) -> Result<FetchOutcome, CatalogError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, "Catalog fetch started");

        let products = self.client.fetch_products().await?;
        Ok(self.apply(ticket, products))
    }

    fn apply(&self, ticket: u64, products: Vec<Product>) -> FetchOutcome {
        let count = products.len();

        // send_if_modified runs the closure under the channel's write lock, so
        // the ticket check and the swap are atomic against other fetches.
        let applied = self.snapshot.send_if_modified(|snapshot| {
            if ticket <= self.applied.load(Ordering::SeqCst) {
                return false;
            }
            self.applied.store(ticket, Ordering::SeqCst);
            *snapshot = CatalogSnapshot::new(products, Utc::now());
            true
        });

        if applied {
            info!(ticket, count, "Catalog updated");
            FetchOutcome::Applied { count }
        } else {
            warn!(
                ticket,
                latest = self.applied.load(Ordering::SeqCst),
                "Discarding stale catalog response"
            );
            FetchOutcome::Superseded
        }
    }

    /// Current snapshot (products plus fetch time).
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Current product list.
    pub fn products(&self) -> Vec<Product> {
        self.snapshot.borrow().products.clone()
    }

    /// Receiver notified on every applied fetch.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.snapshot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_catalog::CatalogSettings;
    use shopfront_core::Money;

    fn state() -> CatalogState {
        // Never contacted: tests drive `apply` directly
        let client = CatalogClient::new(&CatalogSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        CatalogState::new(client)
    }

    fn product(id: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_cents(100 * id))
    }

    #[test]
    fn test_later_ticket_wins_over_earlier() {
        let state = state();

        assert_eq!(
            state.apply(2, vec![product(2)]),
            FetchOutcome::Applied { count: 1 }
        );
        assert_eq!(state.apply(1, vec![product(1)]), FetchOutcome::Superseded);

        let products = state.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 2);
    }

    #[test]
    fn test_in_order_responses_all_apply() {
        let state = state();
        let mut rx = state.subscribe();

        state.apply(1, vec![product(1)]);
        state.apply(2, vec![product(1), product(2)]);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().products.len(), 2);
        assert!(state.snapshot().is_loaded());
    }

    #[test]
    fn test_empty_before_first_fetch() {
        let state = state();
        assert!(!state.snapshot().is_loaded());
        assert!(state.products().is_empty());
    }
}
