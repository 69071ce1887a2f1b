//! # Validation Module
//!
//! Input validation utilities for Shopfront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI argument parsing)                          │
//! │  └── Type checks (is it an integer?)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Catalog URL, timeouts                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE(item_id)                                                   │
//! │  └── CHECK(count > 0)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest request timeout accepted from configuration.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the catalog base URL.
///
/// Only checks the shape; full parsing happens where the URL is used.
///
/// ```rust
/// use shopfront_core::validation::validate_base_url;
///
/// assert!(validate_base_url("https://fakestoreapi.com").is_ok());
/// assert!(validate_base_url("ftp://example.com").is_err());
/// assert!(validate_base_url("  ").is_err());
/// ```
pub fn validate_base_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "base_url".to_string(),
        });
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidFormat {
            field: "base_url".to_string(),
            reason: format!("must start with http:// or https://, got {url}"),
        });
    }

    Ok(())
}

/// Validates a request timeout in seconds (1 to [`MAX_TIMEOUT_SECS`]).
pub fn validate_timeout_secs(secs: u64) -> ValidationResult<()> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(ValidationError::OutOfRange {
            field: "timeout_secs".to_string(),
            min: 1,
            max: MAX_TIMEOUT_SECS as i64,
        });
    }
    Ok(())
}
