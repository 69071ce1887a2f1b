//! # Cart Math
//!
//! Joins the cart mirror with the catalog by `item_id`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart (mirror)             products (catalog)          result           │
//! │  ─────────────             ──────────────────          ──────           │
//! │  item_id=1 count=2  ─────► id=1 price=$10.00  ─────►  line $20.00       │
//! │  item_id=2 count=3  ─────► id=2 price=$5.00   ─────►  line $15.00       │
//! │  item_id=9 count=1  ─────► (not in catalog)   ─────►  skipped           │
//! │                                                        ─────────        │
//! │                                                 total  $35.00           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orphan rows (catalog not loaded yet, product removed upstream) are not
//! errors. They are left out of both the rendered lines and the total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::ProductId;

/// A cart row joined with its product, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub count: i64,

    /// `product.price × count`
    pub line_price: Money,
}

/// Summary of the priced part of the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of lines that joined with a product.
    pub line_count: usize,

    /// Sum of counts over those lines.
    pub total_quantity: i64,

    pub total: Money,
}

fn index(products: &[Product]) -> HashMap<ProductId, &Product> {
    products.iter().map(|p| (p.id, p)).collect()
}

/// Returns the count stored for `item_id`, or 0 when it is not in the cart.
pub fn count_of(cart: &[CartItem], item_id: ProductId) -> i64 {
    cart.iter()
        .find(|row| row.item_id == item_id)
        .map_or(0, |row| row.count)
}

/// Joins the cart with the catalog, keeping cart order and skipping orphans.
pub fn cart_lines(products: &[Product], cart: &[CartItem]) -> Vec<CartLine> {
    let by_id = index(products);

    cart.iter()
        .filter_map(|row| {
            by_id.get(&row.item_id).map(|product| CartLine {
                product: (*product).clone(),
                count: row.count,
                line_price: product.line_price(row.count),
            })
        })
        .collect()
}

/// Sum of `price × count` over every row whose product is in the catalog.
pub fn cart_total(products: &[Product], cart: &[CartItem]) -> Money {
    let by_id = index(products);

    cart.iter()
        .filter_map(|row| by_id.get(&row.item_id).map(|p| p.line_price(row.count)))
        .sum()
}

impl CartTotals {
    pub fn compute(products: &[Product], cart: &[CartItem]) -> Self {
        let by_id = index(products);

        cart.iter()
            .filter_map(|row| by_id.get(&row.item_id).map(|p| (p, row.count)))
            .fold(CartTotals::default(), |mut totals, (product, count)| {
                totals.line_count += 1;
                totals.total_quantity = totals.total_quantity.saturating_add(count);
                totals.total += product.line_price(count);
                totals
            })
    }
}
