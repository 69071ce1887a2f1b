//! # Catalog Error Types
//!
//! Error types for catalog fetches and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │  Network (is_network)    │      │  Configuration               │    │
//! │  │                          │      │                              │    │
//! │  │  Request   (no response) │      │  InvalidConfig               │    │
//! │  │  Status    (non-2xx)     │      │  InvalidUrl                  │    │
//! │  │  Timeout                 │      │  ConfigLoadFailed            │    │
//! │  │  Decode    (bad JSON)    │      │                              │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  Network errors leave the cached product list untouched.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Network Errors
    // =========================================================================
    /// The request could not be sent or no response arrived.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// No complete response within the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// The response body was not a JSON array of products.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<shopfront_core::ValidationError> for CatalogError {
    fn from(err: shopfront_core::ValidationError) -> Self {
        CatalogError::InvalidConfig(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true for failures of the fetch itself (the NetworkError class).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CatalogError::Request(_)
                | CatalogError::Status { .. }
                | CatalogError::Timeout(_)
                | CatalogError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors() {
        assert!(CatalogError::Request("connection refused".into()).is_network());
        assert!(CatalogError::Timeout(30).is_network());
        assert!(CatalogError::Decode("expected array".into()).is_network());
        assert!(CatalogError::Status {
            status: 503,
            message: "busy".into()
        }
        .is_network());

        assert!(!CatalogError::InvalidUrl("nope".into()).is_network());
        assert!(!CatalogError::ConfigLoadFailed("eof".into()).is_network());
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::Status {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }
}
