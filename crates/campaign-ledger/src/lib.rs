//! # Campaign Ledger
//!
//! The unified API for the campaign journal: a deterministic decision engine
//! in front of a tamper-evident, signed, append-only event store.
//!
//! ## Overview
//!
//! - **Commands**: Requests to change a campaign, decided purely against replayed state
//! - **Events**: Immutable facts, canonicalized and content-hashed
//! - **Journal**: Per-campaign, gapless, hash-chained and HMAC-signed
//! - **Pagination**: Cursor tokens bound to the filter and order they came from
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use campaign_ledger::{Ledger, LedgerConfig};
//! use campaign_ledger::core::ActorType;
//! use campaign_ledger::domain::{SequenceIdGenerator, SystemClock};
//!
//! # async fn example() -> campaign_ledger::Result<()> {
//! let ledger = Ledger::in_memory(
//!     Arc::new(SystemClock),
//!     Arc::new(SequenceIdGenerator::new("camp")),
//!     LedgerConfig::with_secret("root-secret"),
//! )?;
//!
//! let (campaign_id, outcome) = ledger
//!     .create_campaign(
//!         ActorType::Participant,
//!         "user-1",
//!         r#"{"name":"Sunfall","game_system":"daggerheart","gm_mode":"human"}"#,
//!     )
//!     .await?;
//! assert!(outcome.is_committed());
//!
//! let report = ledger.verify_campaign(&campaign_id).await?;
//! assert_eq!(report.events_verified, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `campaign_ledger::core` - Events, canonical JSON, hashes
//! - `campaign_ledger::keyring` - Root keys, derivation, signing
//! - `campaign_ledger::domain` - Commands, state, decisions, rejections
//! - `campaign_ledger::store` - Store contract, cursors, verification

pub mod config;
pub mod error;
pub mod ledger;

// Re-export component crates
pub use campaign_ledger_core as core;
pub use campaign_ledger_domain as domain;
pub use campaign_ledger_keyring as keyring;
pub use campaign_ledger_store as store;

// Re-export main types for convenience
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::{CommandOutcome, Ledger};

// Re-export commonly used types
pub use campaign_ledger_core::{ActorType, CampaignId, CommittedEvent, Event};
pub use campaign_ledger_domain::{CampaignState, CampaignStatus, Command, Rejection};
pub use campaign_ledger_store::{EventFilter, EventOrder, EventPage, ListEventsRequest};
