//! Error types for snapnote-core

use thiserror::Error;

/// Result type alias using snapnote-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snapnote-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Durable store backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The value stored under a key is not a valid note collection
    #[error("Stored notes under '{key}' are corrupted: {source}")]
    CorruptedStore {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
