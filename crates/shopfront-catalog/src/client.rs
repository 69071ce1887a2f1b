//! # Catalog Client
//!
//! One request: `GET {base_url}/products` returning a JSON array of products.
//!
//! ```text
//! CatalogClient::fetch_products()
//!      │
//!      ├── send fails / no response ─────► CatalogError::Request
//!      ├── no response within timeout ──► CatalogError::Timeout
//!      ├── non-2xx status ──────────────► CatalogError::Status
//!      ├── body not Vec<Product> ───────► CatalogError::Decode
//!      └── ok ──────────────────────────► Vec<Product>
//! ```
//!
//! The client holds no product state; caching the last good list is the
//! caller's job.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, instrument};
use url::Url;

use crate::config::CatalogSettings;
use crate::error::{CatalogError, CatalogResult};
use shopfront_core::Product;

/// HTTP client for the product catalog.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    timeout_secs: u64,
}

impl CatalogClient {
    /// Builds a client for the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` for an unparsable base URL and `Request` if the
    /// HTTP client fails to build.
    pub fn new(settings: &CatalogSettings) -> CatalogResult<Self> {
        let base = settings.base_url.trim().trim_end_matches('/');
        let products_url = Url::parse(&format!("{base}/products"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                products_url,
                timeout_secs: settings.timeout_secs,
            }),
        })
    }

    /// Full URL of the products endpoint.
    pub fn products_url(&self) -> &Url {
        &self.inner.products_url
    }

    /// Fetches the complete product list.
    #[instrument(skip(self), fields(url = %self.inner.products_url))]
    pub async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        debug!("Fetching products");

        let response = self
            .inner
            .client
            .get(self.inner.products_url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

            error!(status = status.as_u16(), "Catalog returned error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        let products: Vec<Product> = serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, bytes = body.len(), "Catalog response is not a product list");
            CatalogError::Decode(e.to_string())
        })?;

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    fn classify(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            error!(timeout_secs = self.inner.timeout_secs, "Catalog request timed out");
            CatalogError::Timeout(self.inner.timeout_secs)
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            error!(error = %err, "Catalog request failed");
            CatalogError::Request(err.to_string())
        }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("products_url", &self.inner.products_url.as_str())
            .field("timeout_secs", &self.inner.timeout_secs)
            .finish_non_exhaustive()
    }
}
