//! Error types for the hardware crate.

use thiserror::Error;

/// Errors that can occur reading identities or driving effects.
#[derive(Debug, Error)]
pub enum HwError {
    /// The device node could not be opened or read.
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An interactive prompt failed (terminal unavailable, etc.).
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Result type for hardware operations.
pub type Result<T> = std::result::Result<T, HwError>;
