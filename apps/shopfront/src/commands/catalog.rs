//! # Catalog Commands
//!
//! The product list screen: every product with its price and how many are
//! in the cart.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use super::Render;
use crate::state::Storefront;
use shopfront_core::{CatalogSnapshot, Product};

/// One product row on the catalog screen.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRow {
    pub product: Product,
    pub in_cart: i64,
}

/// Catalog screen contents.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductsResponse {
    pub products: Vec<ProductRow>,
    /// When the list was fetched; `None` if no fetch has succeeded yet.
    #[ts(as = "Option<String>")]
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Set when the latest fetch failed and an older list (or none) is shown.
    pub refresh_error: Option<String>,
}

impl ProductsResponse {
    pub fn new(
        snapshot: CatalogSnapshot,
        store: &Storefront,
        refresh_error: Option<String>,
    ) -> Self {
        let products = snapshot
            .products
            .into_iter()
            .map(|product| ProductRow {
                in_cart: store.count(product.id),
                product,
            })
            .collect();

        ProductsResponse {
            products,
            fetched_at: snapshot.fetched_at,
            refresh_error,
        }
    }
}

/// Refreshes the catalog and lists it. A failed refresh still lists whatever
/// was fetched before.
pub async fn products(store: &Storefront) -> ProductsResponse {
    debug!("products command");

    let refresh_error = store.fetch_products().await.err().map(|e| e.message);
    ProductsResponse::new(store.catalog_snapshot(), store, refresh_error)
}

impl Render for ProductsResponse {
    fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(err) = &self.refresh_error {
            out.push_str(&format!("! Could not refresh products: {err}\n"));
        }
        if self.products.is_empty() {
            out.push_str("No products to show\n");
            return out;
        }

        for row in &self.products {
            let badge = if row.in_cart > 0 {
                format!("  [{} in cart]", row.in_cart)
            } else {
                String::new()
            };
            out.push_str(&format!(
                "{:>4}  {:<50} {:>10}{}\n",
                row.product.id,
                truncate(&row.product.title, 50),
                row.product.price.to_string(),
                badge
            ));
        }
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::Money;

    fn response(rows: Vec<ProductRow>, refresh_error: Option<&str>) -> ProductsResponse {
        ProductsResponse {
            products: rows,
            fetched_at: None,
            refresh_error: refresh_error.map(str::to_string),
        }
    }

    #[test]
    fn test_render_rows_and_badges() {
        let text = response(
            vec![
                ProductRow {
                    product: Product::new(1, "Backpack", Money::from_cents(10995)),
                    in_cart: 2,
                },
                ProductRow {
                    product: Product::new(2, "T-Shirt", Money::from_cents(2230)),
                    in_cart: 0,
                },
            ],
            None,
        )
        .render_text();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Backpack") && lines[0].contains("$109.95"));
        assert!(lines[0].ends_with("[2 in cart]"));
        assert!(!lines[1].contains("in cart"));
    }

    #[test]
    fn test_render_failed_refresh() {
        let text = response(Vec::new(), Some("timed out")).render_text();
        assert!(text.contains("Could not refresh products: timed out"));
        assert!(text.contains("No products to show"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
