//! Error types for the Quill core library.
//!
//! Wizard navigation never produces one of these: rejected transitions are
//! reported as [`crate::wizard::Rejection`] values. Errors are reserved for
//! infrastructure (storage, file system, processing backend) and for
//! malformed input at the library boundary.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all studio operations.
#[derive(Error, Debug)]
pub enum StudioError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No PDF tool with the given identifier exists in the catalog
    #[error("Tool '{id}' not found")]
    ToolNotFound { id: String },
    /// No envelope with the given identifier exists
    #[error("Envelope with ID {id} not found")]
    EnvelopeNotFound { id: u64 },
    /// No live wizard session with the given identifier
    #[error("Session {id} not found")]
    SessionNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A wizard definition that violates its construction rules
    #[error("Invalid wizard definition: {reason}")]
    InvalidDefinition { reason: String },
    /// The processing backend reported a failure or could not be reached
    #[error("Processing failed: {message}")]
    Processing { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> StudioError {
        StudioError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> StudioError {
        StudioError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl StudioError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a processing error from any displayable message.
    pub fn processing(message: impl fmt::Display) -> Self {
        Self::Processing {
            message: message.to_string(),
        }
    }

    /// Wraps a join error from the blocking pool.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StudioError::database(message).with_source(e))
    }
}

/// Result type alias for studio operations
pub type Result<T> = std::result::Result<T, StudioError>;
