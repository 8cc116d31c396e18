//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur in profile store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be decoded.
    #[error("corrupt profile record at line {line}: {source}")]
    CorruptRecord {
        /// 1-based line number in the store file.
        line: usize,
        /// The decode failure.
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record named by an update was not found.
    #[error("no profile with identifier matching the update")]
    NotFound,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
