//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │ CatalogSnapshot │       │
//! │  │  (remote, r/o)  │   │ (durable row)   │   │  (in memory)    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  item_id        │   │  products       │       │
//! │  │  title          │   │  id (row key)   │   │  fetched_at     │       │
//! │  │  price (Money)  │   │  count ≥ 1      │   │                 │       │
//! │  │  rating         │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product.id` is assigned by the remote catalog. `CartItem.item_id` points at
//! it but is not a real foreign key: the catalog lives only in memory, so a
//! cart row may outlive the product it references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::ProductId;

// =============================================================================
// Rating
// =============================================================================

/// Customer rating summary. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average score.
    pub rate: f64,

    /// Number of ratings the average is based on.
    pub count: u32,
}

// =============================================================================
// Product
// =============================================================================

/// A product from the remote catalog.
///
/// ## Wire Format
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven Backpack",
///   "price": 109.95,
///   "description": "Your perfect pack for everyday use",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "rating": { "rate": 3.9, "count": 120 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Identifier assigned by the catalog.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price. Travels as a decimal number, held as cents.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Creates a product with the given id, title and price.
    ///
    /// Remaining fields are empty; real products come from the catalog.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Price of `count` units of this product.
    #[inline]
    pub fn line_price(&self, count: i64) -> Money {
        self.price.multiply_quantity(count)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One row of the durable `checkout` table.
///
/// ## Invariants
/// - At most one row per `item_id`
/// - `count >= 1`; a row reaching zero is deleted, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CartItem {
    /// Local row key, assigned by the database.
    pub id: i64,

    /// The product this row counts.
    pub item_id: ProductId,

    /// Units in the cart.
    pub count: i64,
}

impl CartItem {
    pub fn new(id: i64, item_id: ProductId, count: i64) -> Self {
        CartItem { id, item_id, count }
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// The in-memory catalog as last fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,

    /// When `products` was fetched. `None` until the first successful fetch.
    #[ts(as = "Option<String>")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Creates a snapshot fetched at `fetched_at`.
    pub fn new(products: Vec<Product>, fetched_at: DateTime<Utc>) -> Self {
        CatalogSnapshot {
            products,
            fetched_at: Some(fetched_at),
        }
    }

    /// Whether a fetch has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven Backpack",
        "price": 109.95,
        "description": "Your perfect pack for everyday use",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_product_deserializes_catalog_json() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_optional_fields_default() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "title": "Mug", "price": 4}"#).unwrap();
        assert_eq!(product.price.cents(), 400);
        assert!(product.description.is_empty());
        assert_eq!(product.rating, Rating::default());
    }

    #[test]
    fn test_product_serializes_price_as_decimal() {
        let product = Product::new(5, "Tee", Money::from_cents(1299));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(12.99));
    }

    #[test]
    fn test_line_price() {
        let product = Product::new(1, "Backpack", Money::from_cents(1000));
        assert_eq!(product.line_price(3).cents(), 3000);
    }

    #[test]
    fn test_snapshot_loaded() {
        let products = vec![Product::new(1, "a", Money::from_cents(1))];
        let snapshot = CatalogSnapshot::new(products, Utc::now());
        assert!(snapshot.is_loaded());
        assert!(!CatalogSnapshot::default().is_loaded());
    }

    #[test]
    fn test_product_with_huge_price_is_rejected() {
        let err = serde_json::from_str::<Product>(
            r#"{"id": 1, "title": "Yacht", "price": 50000000000000000}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
