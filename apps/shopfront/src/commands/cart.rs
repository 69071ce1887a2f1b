//! # Cart Commands
//!
//! Cart screen and cart mutations.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   add    ┌──────────┐  checkout  ┌──────────────┐        │
//! │  │  Empty   │─────────►│ In Cart  │───────────►│ Order placed │        │
//! │  │  Cart    │◄─────────│          │            │ (cart empty) │        │
//! │  └──────────┘ decrease └──────────┘            └──────────────┘        │
//! │               at 1,     │      ▲                                       │
//! │               remove,   └──────┘                                       │
//! │               clear    increase / decrease                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::Render;
use crate::error::ApiError;
use crate::state::Storefront;
use shopfront_core::{CartLine, CartTotals, ProductId};

// =============================================================================
// Responses
// =============================================================================

/// Cart screen contents.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Cart rows whose product is not in the loaded catalog.
    pub hidden_rows: usize,
    pub refresh_error: Option<String>,
}

/// Result of a single-product mutation.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CountResponse {
    pub item_id: ProductId,
    pub count: i64,
    pub cart_rows: usize,
}

/// Result of clear / checkout / reset.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Shows the cart. The catalog is refreshed first so lines can be priced;
/// rows for products the catalog does not contain are left out.
pub async fn show(store: &Storefront) -> CartResponse {
    debug!("cart command");

    let refresh_error = store.fetch_products().await.err().map(|e| e.message);
    // Best effort: a failed reload keeps the mirror loaded at startup
    let _ = store.reload().await;

    let lines = store.cart_lines();
    let hidden_rows = store.cart().len().saturating_sub(lines.len());

    CartResponse {
        lines,
        totals: store.totals(),
        hidden_rows,
        refresh_error,
    }
}

pub async fn add(store: &Storefront, id: ProductId) -> Result<CountResponse, ApiError> {
    debug!(id, "add command");
    let rows = store.add_to_cart(id).await?;
    Ok(count_response(store, id, rows.len()))
}

pub async fn increase(store: &Storefront, id: ProductId) -> Result<CountResponse, ApiError> {
    debug!(id, "increase command");
    let rows = store.increase(id).await?;
    Ok(count_response(store, id, rows.len()))
}

pub async fn decrease(store: &Storefront, id: ProductId) -> Result<CountResponse, ApiError> {
    debug!(id, "decrease command");
    let rows = store.decrease(id).await?;
    Ok(count_response(store, id, rows.len()))
}

pub async fn remove(store: &Storefront, id: ProductId) -> Result<CountResponse, ApiError> {
    debug!(id, "remove command");
    let rows = store.remove(id).await?;
    Ok(count_response(store, id, rows.len()))
}

pub async fn clear(store: &Storefront) -> Result<MessageResponse, ApiError> {
    debug!("clear command");
    store.clear().await?;
    Ok(MessageResponse::new("Cart cleared"))
}

/// Places the order: requires a non-empty cart, then empties it.
pub async fn checkout(store: &Storefront) -> Result<MessageResponse, ApiError> {
    debug!("checkout command");

    let rows = store.reload().await?;
    if rows.is_empty() {
        return Err(ApiError::validation("Cart is empty"));
    }

    let units: i64 = rows.iter().map(|row| row.count).sum();
    store.clear().await?;
    info!(rows = rows.len(), units, "Order placed");

    Ok(MessageResponse::new("Order placed"))
}

pub async fn reset(store: &Storefront) -> Result<MessageResponse, ApiError> {
    debug!("reset command");
    store.drop_database().await?;
    Ok(MessageResponse::new("Cart database deleted"))
}

fn count_response(store: &Storefront, item_id: ProductId, cart_rows: usize) -> CountResponse {
    CountResponse {
        item_id,
        count: store.count(item_id),
        cart_rows,
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl Render for CartResponse {
    fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(err) = &self.refresh_error {
            out.push_str(&format!("! Could not refresh products: {err}\n"));
        }

        if self.lines.is_empty() && self.hidden_rows == 0 {
            out.push_str("Cart is empty\n");
            return out;
        }

        for line in &self.lines {
            out.push_str(&format!(
                "{:>4}  {:<40} {:>3} x {:>9} = {:>10}\n",
                line.product.id,
                line.product.title,
                line.count,
                line.product.price.to_string(),
                line.line_price.to_string(),
            ));
        }
        if self.hidden_rows > 0 {
            out.push_str(&format!(
                "({} item(s) not shown: product not in catalog)\n",
                self.hidden_rows
            ));
        }
        out.push_str(&format!("Total: {}\n", self.totals.total));
        out
    }
}

impl Render for CountResponse {
    fn render_text(&self) -> String {
        if self.count == 0 {
            format!("Product {} is not in the cart\n", self.item_id)
        } else {
            format!("Product {}: {} in cart\n", self.item_id, self.count)
        }
    }
}

impl Render for MessageResponse {
    fn render_text(&self) -> String {
        format!("{}\n", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Money, Product};

    #[test]
    fn test_render_cart() {
        let product = Product::new(1, "Backpack", Money::from_cents(1000));
        let response = CartResponse {
            lines: vec![CartLine {
                line_price: Money::from_cents(2000),
                product,
                count: 2,
            }],
            totals: CartTotals {
                line_count: 1,
                total_quantity: 2,
                total: Money::from_cents(2000),
            },
            hidden_rows: 1,
            refresh_error: None,
        };

        let text = response.render_text();
        assert!(text.contains("Backpack"));
        assert!(text.contains("$20.00"));
        assert!(text.contains("1 item(s) not shown"));
        assert!(text.trim_end().ends_with("Total: $20.00"));
    }

    #[test]
    fn test_render_empty_cart() {
        let response = CartResponse {
            lines: Vec::new(),
            totals: CartTotals::default(),
            hidden_rows: 0,
            refresh_error: None,
        };
        assert_eq!(response.render_text(), "Cart is empty\n");
    }

    #[test]
    fn test_render_count() {
        let gone = CountResponse {
            item_id: 7,
            count: 0,
            cart_rows: 0,
        };
        assert_eq!(gone.render_text(), "Product 7 is not in the cart\n");

        let two = CountResponse {
            item_id: 7,
            count: 2,
            cart_rows: 1,
        };
        assert_eq!(two.render_text(), "Product 7: 2 in cart\n");
    }
}
