use thiserror::Error;

/// PostgreSQL SQLSTATE for `invalid_catalog_name`, reported when connecting
/// to a database that does not exist.
pub const ERROR_UNKNOWN_DATABASE: &str = "3D000";

/// Error type for driver operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriverError {
    #[error("Connection failed (code {code}): {message}")]
    ConnectionFailed { code: String, message: String },

    #[error("Database selection failed (code {code}): {message}")]
    SelectionFailed { code: String, message: String },

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Not connected to a database")]
    NotConnected,
}

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;
