//! Error types for the keyring.

use thiserror::Error;

/// Errors that can occur while building a keyring or signing chain hashes.
///
/// [`KeyringError::SignatureMismatch`] is the only variant that means "the
/// data does not match its signature". Every other variant means the keyring
/// or the request is misconfigured, so operators can tell tampering apart
/// from configuration mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyringError {
    /// No root keys were supplied.
    #[error("keyring requires at least one root key")]
    NoKeys,

    /// The active key id is blank.
    #[error("active key id is required")]
    MissingActiveKey,

    /// The active key id does not name a configured root key.
    #[error("active key id {0:?} is not present in the keyring")]
    ActiveKeyNotFound(String),

    /// A root key was configured with a blank id.
    #[error("key id is required")]
    EmptyKeyId,

    /// Two root keys were configured under the same id.
    #[error("key id {0:?} configured more than once")]
    DuplicateKeyId(String),

    /// A root key was configured with no secret bytes.
    #[error("key {0:?} has empty key material")]
    EmptyKeyMaterial(String),

    /// The requested key id is not configured.
    #[error("unknown key id: {0:?}")]
    UnknownKeyId(String),

    /// No keyring was configured for signing.
    #[error("keyring is not configured")]
    Unconfigured,

    /// The campaign id used for key derivation is blank.
    #[error("campaign id is required")]
    EmptyCampaignId,

    /// The chain hash to sign or verify is blank.
    #[error("chain hash is required")]
    EmptyChainHash,

    /// HKDF or HMAC rejected the key material.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The signature does not match the chain hash.
    #[error("chain hash signature mismatch")]
    SignatureMismatch,

    /// A `id=secret` key specification could not be parsed.
    #[error("invalid key spec: {0}")]
    InvalidKeySpec(String),
}

/// Result type for keyring operations.
pub type Result<T> = std::result::Result<T, KeyringError>;
