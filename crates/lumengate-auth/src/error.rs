//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur in authentication and enrollment operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested effect is not in the active catalog.
    #[error("effect '{0}' is not in the catalog")]
    UnknownEffect(String),

    /// The keyed scheme is active but its deployment secret is absent.
    /// Startup-fatal: the system never falls back to a weaker scheme.
    #[error("deployment secret missing: set the {0} environment variable")]
    MissingPepper(String),

    /// A hashing primitive failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// The underlying profile store failed.
    #[error(transparent)]
    Store(#[from] lumengate_store::StoreError),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
