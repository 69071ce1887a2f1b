//! # shopfront-catalog: Remote Catalog for Shopfront
//!
//! Fetches the product list from the storefront REST API and loads the
//! application configuration.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Fetch Path                               │
//! │                                                                         │
//! │  ShopfrontConfig::load(path)                                           │
//! │       │  defaults → shopfront.toml → SHOPFRONT_* env → validate        │
//! │       ▼                                                                 │
//! │  CatalogClient::new(&config.catalog)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetch_products() ──── GET {base_url}/products ────► REST API          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product>  or  CatalogError (network class → caller keeps stale)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use shopfront_catalog::{CatalogClient, ShopfrontConfig};
//!
//! let config = ShopfrontConfig::load_or_default(None);
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.fetch_products().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::CatalogClient;
pub use config::{CatalogSettings, ShopfrontConfig, StorageSettings};
pub use error::{CatalogError, CatalogResult};
