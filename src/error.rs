//! Error types for the object cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failures reported by a shared store backend.
///
/// The cache engine never propagates these; it logs them and reports the
/// operation as failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// No room for a new key
    #[error("Store full: {0}")]
    Full(String),

    /// Increment or decrement on a value that is not an integer
    #[error("Value is not numeric: {0}")]
    NotNumeric(String),
}

/// Convenience Result type for shared store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Cache Error Enum ==
/// Error type for the HTTP adapter.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP adapter.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::Full("capacity 10 reached".to_string());
        assert_eq!(err.to_string(), "Store full: capacity 10 reached");
    }

    #[test]
    fn test_cache_error_status_codes() {
        let response = CacheError::NotFound("k".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = CacheError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
