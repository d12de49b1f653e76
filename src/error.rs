//! Error types for the document keeper
//!
//! Provides unified error handling using thiserror. Request-path failures are
//! collapsed into `KeeperError` and rendered as a JSON envelope at the HTTP
//! boundary; startup failures use `ConfigError` and never reach a handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Keeper Error Enum ==
/// Unified error type for every request-handling path.
#[derive(Error, Debug)]
pub enum KeeperError {
    /// Missing or malformed client input
    #[error("{0}")]
    Validation(String),

    /// Key absent or expired
    #[error("{0}")]
    NotFound(String),

    /// Request body over the configured limit
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Document could not be encoded for storage
    #[error("failed to serialize data: {0}")]
    Serialization(String),

    /// Stored bytes failed to decode back into JSON
    #[error("corrupted data in storage")]
    CorruptData,

    /// Backing engine unreachable or rejected the command
    #[error("storage backend error: {0}")]
    Backend(#[from] BackendError),

    /// Outbound fetch failed before a response arrived
    #[error("failed to fetch: {0}")]
    Upstream(String),

    /// Outbound response body could not be read
    #[error("failed to read response")]
    Read,
}

impl KeeperError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KeeperError::Validation(_) => StatusCode::BAD_REQUEST,
            KeeperError::NotFound(_) => StatusCode::NOT_FOUND,
            KeeperError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            KeeperError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            KeeperError::CorruptData => StatusCode::INTERNAL_SERVER_ERROR,
            KeeperError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            KeeperError::Upstream(_) => StatusCode::BAD_GATEWAY,
            KeeperError::Read => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for KeeperError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Backend Error ==
/// Failure reported by a backing engine client.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

// == Config Error ==
/// Startup configuration failure. Fatal to the process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for request-handling code.
pub type Result<T> = std::result::Result<T, KeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            KeeperError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            KeeperError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            KeeperError::PayloadTooLarge(1024).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            KeeperError::Upstream("refused".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            KeeperError::CorruptData.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            KeeperError::from(BackendError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            KeeperError::Validation("invalid url format".into()).to_string(),
            "invalid url format"
        );
        assert_eq!(KeeperError::Read.to_string(), "failed to read response");
        assert_eq!(
            ConfigError::Missing("UPSTASH_REDIS_URL").to_string(),
            "UPSTASH_REDIS_URL environment variable is not set"
        );
    }
}
