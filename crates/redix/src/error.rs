//! Error types for redix

use std::time::Duration;
use thiserror::Error;

/// Result type alias for redix operations
pub type KvResult<T> = Result<T, KvError>;

/// Error types for key-value operations
#[derive(Debug, Error)]
pub enum KvError {
    /// Could not establish the connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error reported by the server or the client library
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Command did not complete within the configured timeout
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// Malformed connection URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl KvError {
    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
