//! # Campaign Ledger Core
//!
//! Pure primitives for the campaign ledger: events, canonical JSON, and the
//! content and chain hashes that give every event a stable identity.
//!
//! This crate contains no I/O, no storage, no key material. It is pure
//! computation over event envelopes.
//!
//! ## Key Types
//!
//! - [`Event`] - An uncommitted domain event
//! - [`CommittedEvent`] - An event as persisted, with sequence, hashes and signature
//! - [`HashedEvent`] - An event paired with its content hash
//! - [`CampaignId`] - Identifier of the campaign aggregate
//!
//! ## Canonicalization
//!
//! All hashes are computed over canonical JSON. See the [`canonical`] module.

pub mod canonical;
pub mod error;
pub mod event;
pub mod hash;
pub mod types;

pub use canonical::{canonical_json, content_hash, CONTENT_HASH_BYTES};
pub use error::{CanonicalError, HashError};
pub use event::{CommittedEvent, Event, EventBuilder};
pub use hash::{chain_hash, event_hash, HashedEvent, GENESIS_PREV_HASH};
pub use types::{ActorType, CampaignId};
