//! Error types for mysqlx

use thiserror::Error;

/// Result type alias for mysqlx operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement preparation, execution or result retrieval failed in the driver
    #[error("Driver error: {0}")]
    Driver(#[from] sqlx::Error),

    /// Malformed DSN
    #[error("Invalid DSN: {0}")]
    Dsn(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a DSN error
    pub fn dsn(message: impl Into<String>) -> Self {
        Self::Dsn(message.into())
    }

    /// The database-reported error, if the driver got that far.
    pub fn as_database_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        match self {
            Self::Driver(err) => err.as_database_error(),
            _ => None,
        }
    }

    /// Check if this is a unique constraint violation (MySQL 1062 and friends)
    pub fn is_unique_violation(&self) -> bool {
        self.as_database_error()
            .is_some_and(|e| e.is_unique_violation())
    }

    /// Check if this is a foreign key violation
    pub fn is_foreign_key_violation(&self) -> bool {
        self.as_database_error()
            .is_some_and(|e| e.is_foreign_key_violation())
    }

    /// Check if this is a validation error raised before reaching the driver
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
