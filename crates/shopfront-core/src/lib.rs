//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! Domain types and cart math shared by every other crate in the workspace.
//! Nothing in here touches the network, the disk or a clock it does not own.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (CLI / mobile UI)                 │   │
//! │  │       Catalog screen ──► Product card ──► Cart screen           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             Storefront (apps/shopfront state layer)             │   │
//! │  │     fetch_products, add_to_cart, increase, decrease, remove     │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼────────────────┐   ┌─────────────▼────────────────┐  │
//! │  │  shopfront-catalog (HTTP)     │   │  shopfront-db (SQLite)       │  │
//! │  └──────────────┬────────────────┘   └─────────────┬────────────────┘  │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartLine  │  │  item ids │  │   │
//! │  │   │ CartItem  │  │           │  │  totals   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Rating, CartItem, CatalogSnapshot)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Joining the cart with the catalog: line prices and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::cart::cart_total;
//! use shopfront_core::{CartItem, Money, Product};
//!
//! let products = vec![
//!     Product::new(1, "Backpack", Money::from_cents(1000)),
//!     Product::new(2, "Mug", Money::from_cents(500)),
//! ];
//! let cart = vec![CartItem::new(1, 1, 2), CartItem::new(2, 2, 3)];
//!
//! assert_eq!(cart_total(&products, &cart), Money::from_cents(3500));
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

/// Product ids are assigned by the remote catalog; this is the type they use.
pub type ProductId = i64;
