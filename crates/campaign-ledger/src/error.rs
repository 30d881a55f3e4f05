//! Error types for the Ledger.

use campaign_ledger_keyring::KeyringError;
use campaign_ledger_store::{IntegrityError, StoreError};
use thiserror::Error;

/// Errors that can occur during Ledger operations.
///
/// Domain rejections are not errors; they come back as
/// [`CommandOutcome::Rejected`](crate::CommandOutcome::Rejected).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Storage error, including append conflicts.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Keyring could not be built.
    #[error("keyring error: {0}")]
    Keyring(#[from] KeyringError),

    /// Stored events failed verification.
    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LedgerError {
    /// True if the append lost an optimistic concurrency race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict { .. }))
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
