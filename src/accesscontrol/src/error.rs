//! Error types for the access control crate

use thiserror::Error;

/// Access control errors
///
/// Queries against a built trie never fail. These errors only come from
/// the edges: configuring a builder and loading permission data.
#[derive(Debug, Error)]
pub enum AccessControlError {
    /// Invalid trie configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Permission data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for access control operations
pub type Result<T> = std::result::Result<T, AccessControlError>;
