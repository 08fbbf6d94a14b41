//! Error types for archive-ingest
//!
//! This module defines the error hierarchy for the whole pipeline.
//! Insert outcomes are not errors: see [`crate::gateway::InsertOutcome`].

use thiserror::Error;

/// The main error type for archive-ingest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Object Store Errors
    // ============================================================================
    #[error("Failed to list objects in {container}: {message}")]
    Listing { container: String, message: String },

    #[error("Failed to download {object}: {message}")]
    Download { object: String, message: String },

    #[error("No such object: {object}")]
    ObjectNotFound { object: String },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Failed to parse {object}: {message}")]
    Parse { object: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    // ============================================================================
    // Database Errors
    // ============================================================================
    #[error("Database connection failed: {message}")]
    Connection { message: String },

    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing document field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a document parse error
    pub fn parse(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            object: object.into(),
            message: message.into(),
        }
    }

    /// Create a listing error
    pub fn listing(container: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listing {
            container: container.into(),
            message: message.into(),
        }
    }

    /// Create a download error
    pub fn download(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            object: object.into(),
            message: message.into(),
        }
    }

    /// Create a database connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Check if this error is a document parse error
    ///
    /// Parse errors are the only run-fatal errors that the skip policy
    /// may downgrade to a per-object warning.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

/// Result type alias for archive-ingest
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
