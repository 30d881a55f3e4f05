//! Error types for the store module.

use campaign_ledger_core::HashError;
use campaign_ledger_keyring::KeyringError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The journal head moved since the caller read it.
    #[error("append conflict on campaign {campaign_id}: expected head {expected}, found {actual}")]
    Conflict {
        campaign_id: String,
        expected: u64,
        actual: u64,
    },

    /// Malformed request (blank campaign id, bad order expression, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Page token could not be used.
    #[error("invalid page token: {0}")]
    Cursor(#[from] CursorError),

    /// Event could not be hashed.
    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    /// Chain hash could not be signed.
    #[error("signing error: {0}")]
    Keyring(#[from] KeyringError),

    /// Stored events failed verification.
    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Cursor decoding and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor is empty")]
    Empty,

    #[error("cursor is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("cursor is malformed: {0}")]
    Malformed(String),

    #[error("unknown cursor direction {0:?}")]
    UnknownDirection(String),

    /// The cursor was issued for a different filter.
    #[error("cursor filter does not match request filter")]
    FilterMismatch,

    /// The cursor was issued for a different ordering.
    #[error("cursor order does not match request order")]
    OrderMismatch,
}

/// A committed journal that fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("sequence gap: expected seq {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },

    #[error("event hash mismatch at seq {seq}: stored {stored}, computed {computed}")]
    EventHashMismatch {
        seq: u64,
        stored: String,
        computed: String,
    },

    #[error("chain broken at seq {seq}: expected prev {expected:?}, found {found:?}")]
    ChainBroken {
        seq: u64,
        expected: String,
        found: String,
    },

    #[error("chain hash mismatch at seq {seq}: stored {stored}, computed {computed}")]
    ChainHashMismatch {
        seq: u64,
        stored: String,
        computed: String,
    },

    #[error("signature check failed at seq {seq}: {source}")]
    Signature {
        seq: u64,
        #[source]
        source: KeyringError,
    },

    #[error("event at seq {seq} cannot be hashed: {reason}")]
    Unhashable { seq: u64, reason: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
