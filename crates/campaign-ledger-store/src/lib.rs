//! # Campaign Ledger Store
//!
//! The event store contract for the campaign journal, plus the pieces every
//! implementation shares: sealing (sequence, chain hash, signature), page
//! tokens, and journal verification.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all journal operations
//! - [`MemoryStore`] - In-memory reference implementation
//! - [`ExpectedHead`] - Optimistic concurrency guard for appends
//! - [`ListEventsRequest`] / [`EventPage`] - Filtered, paginated reads
//! - [`Cursor`] - Decoded page token
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use campaign_ledger_core::{ActorType, CampaignId, Event};
//! use campaign_ledger_keyring::Keyring;
//! use campaign_ledger_store::{ExpectedHead, ListEventsRequest, MemoryStore, Store};
//!
//! # async fn example() -> campaign_ledger_store::Result<()> {
//! let keyring = Keyring::new([("v1", b"root-secret".to_vec())], "v1")?;
//! let store = MemoryStore::with_keyring(Arc::new(keyring));
//!
//! let event = Event::builder(
//!     CampaignId::new("camp-1"),
//!     "campaign.created",
//!     chrono::Utc::now(),
//!     ActorType::Participant,
//!     "user-1",
//! )
//! .build();
//! let committed = store.append_event(&event, ExpectedHead::Seq(0)).await?;
//! assert_eq!(committed.seq, 1);
//!
//! let page = store
//!     .list_events_page(&ListEventsRequest::new(CampaignId::new("camp-1")))
//!     .await?;
//! assert_eq!(page.total_count, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Notes
//!
//! - **Gapless sequences**: `seq` starts at 1 per campaign and increments by one
//! - **Hash chain**: each event's `prev_event_hash` is its predecessor's chain hash
//! - **Signed**: every chain hash is signed with the active key's campaign key
//! - **Stable pagination**: page tokens are bound to the filter and order they
//!   were issued for

pub mod cursor;
pub mod error;
pub mod integrity;
pub mod memory;
pub mod seal;
pub mod traits;

pub use cursor::{
    decode_cursor, encode_cursor, hash_filter, hash_order, validate_filter_hash,
    validate_order_hash, Cursor, Direction,
};
pub use error::{CursorError, IntegrityError, Result, StoreError};
pub use integrity::{verify_event, verify_journal, verify_signature, JournalReport};
pub use memory::MemoryStore;
pub use seal::seal_event;
pub use traits::{
    EventFilter, EventOrder, EventPage, ExpectedHead, JournalHead, ListEventsRequest, Store,
    StoreExt, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
