//! Error types for the campaign ledger core.

use thiserror::Error;

/// Errors raised while producing canonical JSON.
#[derive(Debug, Error)]
pub enum CanonicalError {
    #[error("value is not representable as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while computing event and chain hashes.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("canonical encoding failed: {0}")]
    Canonical(#[from] CanonicalError),

    /// A chain hash was requested for an event that was never hashed.
    #[error("event hash is required to compute a chain hash")]
    MissingEventHash,
}
