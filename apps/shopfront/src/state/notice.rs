//! Non-blocking error notifications for the presentation layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::error::{ApiError, ErrorCode};

/// A failed store operation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notice {
    /// Store operation that failed, e.g. `fetch_products`.
    pub operation: String,
    pub code: ErrorCode,
    pub message: String,
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(operation: &str, error: &ApiError) -> Self {
        Notice {
            operation: operation.to_string(),
            code: error.code,
            message: error.message.clone(),
            at: Utc::now(),
        }
    }

    /// Short user-facing line.
    pub fn headline(&self) -> String {
        match self.code {
            ErrorCode::NetworkError => "Could not refresh products; showing the last list".into(),
            ErrorCode::StorageError => "Could not update the cart".into(),
            ErrorCode::ValidationError => self.message.clone(),
            ErrorCode::NotFound => self.message.clone(),
            ErrorCode::Internal => "Something went wrong".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_from_error() {
        let err = ApiError::new(ErrorCode::NetworkError, "Catalog returned HTTP 500: boom");
        let notice = Notice::new("fetch_products", &err);

        assert_eq!(notice.operation, "fetch_products");
        assert_eq!(notice.code, ErrorCode::NetworkError);
        assert!(notice.headline().contains("last list"));
    }
}
