//! # Campaign Ledger Keyring
//!
//! HMAC signing for the campaign journal's hash chain.
//!
//! ## Overview
//!
//! Every committed event carries a chain hash that binds it to its
//! predecessor. The keyring signs that chain hash so the journal is
//! tamper-evident: rewriting any event changes every later chain hash, and
//! forging the new chain requires the root key.
//!
//! ## Key Model
//!
//! 1. **Root keys**: configured secrets identified by a key id (`v1`, `v2`, ...)
//! 2. **Campaign keys**: derived per campaign with HKDF-SHA256, info `campaign:<id>`
//! 3. **Signatures**: HMAC-SHA256 of the chain hash under the campaign key, hex
//!
//! One root key is active and signs new events. Any configured key verifies,
//! so rotation only adds a key and moves the active id.
//!
//! ## Usage
//!
//! ```rust
//! use campaign_ledger_keyring::{Keyring, KeyringConfig};
//!
//! let keyring = KeyringConfig::rotating("v1=old-secret,v2=new-secret", "v2")
//!     .build()
//!     .unwrap();
//!
//! let sig = keyring
//!     .sign_chain_hash("camp-1", "0123456789abcdef0123456789abcdef")
//!     .unwrap();
//! assert_eq!(sig.key_id, "v2");
//!
//! keyring
//!     .verify_chain_hash("camp-1", "0123456789abcdef0123456789abcdef", &sig.signature, &sig.key_id)
//!     .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod keyring;

pub use config::{parse_key_specs, KeyringConfig, DEFAULT_KEY_ID};
pub use error::{KeyringError, Result};
pub use keyring::{derive_campaign_key, sign_with, ChainSignature, DerivedKey, Keyring, RootKey};
