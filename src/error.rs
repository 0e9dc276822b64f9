//! Error types for claimquery.

use thiserror::Error;

/// Main error type for claimquery operations.
#[derive(Error, Debug)]
pub enum ClaimQueryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Backend-related errors (record loading, query execution).
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to load records from {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for claimquery operations.
pub type Result<T> = std::result::Result<T, ClaimQueryError>;
