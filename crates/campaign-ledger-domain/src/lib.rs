//! # Campaign Ledger Domain
//!
//! The decision engine for the campaign aggregate. Given the current
//! [`CampaignState`] and a [`Command`], [`decide`] returns a [`Decision`]:
//! either events to append or a coded [`Rejection`].
//!
//! Everything here is pure. Time comes from an injected [`Clock`]; new
//! campaign ids come from an injected [`IdGenerator`].
//!
//! ## Key Types
//!
//! - [`Command`] - A request to change a campaign, payload carried as raw JSON
//! - [`CampaignState`] - Projection the engine reads (`created`, `status`)
//! - [`Decision`] - Events or rejections, never both
//! - [`Rejection`] - Stable code plus message, see [`rejection::codes`]
//!
//! ## Lifecycle
//!
//! ```text
//! (none) --create--> draft --activate--> active --end--> completed
//!                      |                   |
//!                      +---archive---------+--archive--> archived --restore--> draft
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use campaign_ledger_core::{ActorType, CampaignId};
//! use campaign_ledger_domain::{command::types, decide, CampaignState, Command, SystemClock};
//!
//! let command = Command::new(
//!     CampaignId::new("camp-1"),
//!     types::CAMPAIGN_CREATE,
//!     ActorType::Participant,
//!     "user-1",
//!     r#"{"name":"Sunfall","game_system":"daggerheart","gm_mode":"human"}"#,
//! );
//! let decision = decide(&CampaignState::default(), &command, &SystemClock);
//! assert!(decision.is_accepted());
//! ```

mod campaign;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod decide;
pub mod decision;
pub mod events;
pub mod ids;
pub mod labels;
pub mod rejection;
pub mod state;

pub use campaign::DEFAULT_LOCALE;
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Command, CommandKind};
pub use decide::decide;
pub use decision::Decision;
pub use ids::{IdGenerator, SequenceIdGenerator, UuidGenerator};
pub use labels::{AccessPolicy, CampaignIntent, GameSystem, GmMode, Label};
pub use rejection::Rejection;
pub use state::{CampaignState, CampaignStatus};
