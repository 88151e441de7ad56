//! Error types for corm

use thiserror::Error;

/// Result type alias for corm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for ORM operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// The type or instance is not a valid mapped entity, or an operation
    /// was attempted that its mapping cannot support. Always raised before
    /// any SQL is generated or executed.
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// A driver could not be resolved for a data source.
    #[error("Driver load error: {0}")]
    DriverLoad(#[from] DriverLoadError),

    /// Configuration could not be read.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The connection agent failed to open or use a connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution failed; the underlying cause is passed through
    /// untranslated.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Row value decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl OrmError {
    /// Create an invalid-mapping error
    pub fn invalid_mapping(message: impl Into<String>) -> Self {
        Self::InvalidMapping(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid-mapping error
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self, Self::InvalidMapping(_))
    }

    /// Check if this is a driver load error
    pub fn is_driver_load(&self) -> bool {
        matches!(self, Self::DriverLoad(_))
    }
}

/// Causes for a driver resolution failure, each surfaced as its own
/// variant so callers can branch on them.
#[derive(Debug, Error)]
pub enum DriverLoadError {
    /// The data-source id is not present in configuration.
    #[error("data source '{0}' is not configured")]
    UnknownDataSource(String),

    /// The data source exists but names no driver.
    #[error("data source '{0}' does not name a CORM driver")]
    EmptyDriverName(String),

    /// No constructor is registered under the configured driver name.
    #[error("no CORM driver registered under '{0}'")]
    NotFound(String),

    /// The registered constructor returned an error.
    #[error("CORM driver '{name}' failed to construct: {message}")]
    ConstructionFailed { name: String, message: String },
}
