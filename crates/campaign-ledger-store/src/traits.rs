//! Store trait: the abstract interface for the campaign journal.
//!
//! The decision engine never talks to storage. The composition root hands
//! uncommitted events to a [`Store`], which assigns sequence numbers, links
//! the chain, signs, and appends.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use campaign_ledger_core::{CampaignId, CommittedEvent, Event, GENESIS_PREV_HASH};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Page size used when a request does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page a request may ask for.
pub const MAX_PAGE_SIZE: usize = 200;

/// Batch size used by [`StoreExt::read_journal`].
const REPLAY_BATCH: usize = 500;

/// Optimistic concurrency guard for appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedHead {
    /// Append regardless of the current head.
    Any,
    /// Append only if the journal's last sequence number is exactly this
    /// (`0` for an empty journal).
    Seq(u64),
}

/// Last committed position of a campaign journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalHead {
    /// `0` when the journal is empty.
    pub seq: u64,
    /// Chain hash of the last event, [`GENESIS_PREV_HASH`] when empty.
    pub chain_hash: String,
}

impl JournalHead {
    /// Head of an empty journal.
    pub fn genesis() -> Self {
        Self {
            seq: 0,
            chain_hash: GENESIS_PREV_HASH.to_string(),
        }
    }

    /// Head after `event`.
    pub fn of(event: &CommittedEvent) -> Self {
        Self {
            seq: event.seq,
            chain_hash: event.chain_hash.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }
}

impl Default for JournalHead {
    fn default() -> Self {
        Self::genesis()
    }
}

/// Equality filter over committed events. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl EventFilter {
    pub fn event_type(mut self, value: impl Into<String>) -> Self {
        self.event_type = Some(value.into());
        self
    }

    pub fn session_id(mut self, value: impl Into<String>) -> Self {
        self.session_id = Some(value.into());
        self
    }

    pub fn actor_type(mut self, value: impl Into<String>) -> Self {
        self.actor_type = Some(value.into());
        self
    }

    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set terms, sorted by field name.
    fn terms(&self) -> Vec<(&'static str, &str)> {
        [
            ("actor_type", self.actor_type.as_deref()),
            ("entity_id", self.entity_id.as_deref()),
            ("entity_type", self.entity_type.as_deref()),
            ("event_type", self.event_type.as_deref()),
            ("session_id", self.session_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    /// Canonical expression, hashed into page tokens.
    ///
    /// `field = "value"` terms sorted by field and joined by ` AND `. The
    /// empty filter renders as `""`.
    pub fn expression(&self) -> String {
        self.terms()
            .into_iter()
            .map(|(field, value)| {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("{field} = \"{escaped}\"")
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn is_empty(&self) -> bool {
        self.terms().is_empty()
    }

    /// True if `event` satisfies every set term.
    pub fn matches(&self, event: &CommittedEvent) -> bool {
        let e = &event.event;
        let eq = |want: &Option<String>, have: Option<&str>| match want {
            Some(want) => have == Some(want.as_str()),
            None => true,
        };
        eq(&self.event_type, Some(e.event_type.as_str()))
            && eq(&self.session_id, e.session_id.as_deref())
            && eq(&self.actor_type, Some(e.actor_type.as_str()))
            && eq(&self.entity_type, e.entity_type.as_deref())
            && eq(&self.entity_id, e.entity_id.as_deref())
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventOrder {
    #[default]
    Ascending,
    Descending,
}

impl EventOrder {
    /// Order expression, hashed into page tokens.
    pub fn expression(self) -> &'static str {
        match self {
            Self::Ascending => "seq",
            Self::Descending => "seq desc",
        }
    }

    pub fn is_descending(self) -> bool {
        self == Self::Descending
    }
}

impl FromStr for EventOrder {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_lowercase();
        match normalized.as_str() {
            "" | "seq" | "seq asc" => Ok(Self::Ascending),
            "seq desc" => Ok(Self::Descending),
            _ => Err(StoreError::InvalidRequest(format!(
                "unsupported order expression {s:?}"
            ))),
        }
    }
}

impl fmt::Display for EventOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

/// A paginated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub campaign_id: CampaignId,
    /// `0` means [`DEFAULT_PAGE_SIZE`]; values above [`MAX_PAGE_SIZE`] are clamped.
    pub page_size: usize,
    pub page_token: Option<String>,
    pub filter: EventFilter,
    pub order: EventOrder,
}

impl ListEventsRequest {
    pub fn new(campaign_id: CampaignId) -> Self {
        Self {
            campaign_id,
            page_size: 0,
            page_token: None,
            filter: EventFilter::default(),
            order: EventOrder::Ascending,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    pub fn filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order(mut self, order: EventOrder) -> Self {
        self.order = order;
        self
    }

    /// Page size after defaulting and clamping.
    pub fn effective_page_size(&self) -> usize {
        match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }
}

/// One page of events, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub events: Vec<CommittedEvent>,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// Events matching the filter, across all pages.
    pub total_count: u64,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
}

/// The Store trait: async interface for the campaign journal.
///
/// # Design Notes
///
/// - **Single writer per campaign**: sequence assignment, chain linkage and
///   signing happen atomically per append, so `seq` and `prev_event_hash`
///   never race.
/// - **All or nothing**: an append that fails to hash or sign leaves the
///   journal untouched.
/// - **Immutable**: committed events are never updated or deleted.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Write
    // ─────────────────────────────────────────────────────────────────────────

    /// Seal and append one event.
    ///
    /// Fails with [`StoreError::Conflict`] if `expected` no longer matches
    /// the journal head.
    async fn append_event(&self, event: &Event, expected: ExpectedHead) -> Result<CommittedEvent>;

    // ─────────────────────────────────────────────────────────────────────────
    // Read
    // ─────────────────────────────────────────────────────────────────────────

    /// Get one event by position.
    async fn get_event(&self, campaign_id: &CampaignId, seq: u64) -> Result<Option<CommittedEvent>>;

    /// Up to `limit` events with `seq > after_seq`, ascending.
    async fn list_events(
        &self,
        campaign_id: &CampaignId,
        after_seq: u64,
        limit: usize,
    ) -> Result<Vec<CommittedEvent>>;

    /// One page of a filtered, ordered listing.
    async fn list_events_page(&self, request: &ListEventsRequest) -> Result<EventPage>;

    /// Current head of a campaign journal.
    async fn head(&self, campaign_id: &CampaignId) -> Result<JournalHead>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn append_event(&self, event: &Event, expected: ExpectedHead) -> Result<CommittedEvent> {
        (**self).append_event(event, expected).await
    }

    async fn get_event(&self, campaign_id: &CampaignId, seq: u64) -> Result<Option<CommittedEvent>> {
        (**self).get_event(campaign_id, seq).await
    }

    async fn list_events(
        &self,
        campaign_id: &CampaignId,
        after_seq: u64,
        limit: usize,
    ) -> Result<Vec<CommittedEvent>> {
        (**self).list_events(campaign_id, after_seq, limit).await
    }

    async fn list_events_page(&self, request: &ListEventsRequest) -> Result<EventPage> {
        (**self).list_events_page(request).await
    }

    async fn head(&self, campaign_id: &CampaignId) -> Result<JournalHead> {
        (**self).head(campaign_id).await
    }
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Read a campaign's whole journal, ascending.
    fn read_journal(
        &self,
        campaign_id: &CampaignId,
    ) -> impl Future<Output = Result<Vec<CommittedEvent>>> + Send;
}

impl<S: Store + ?Sized> StoreExt for S {
    async fn read_journal(&self, campaign_id: &CampaignId) -> Result<Vec<CommittedEvent>> {
        let mut journal = Vec::new();
        let mut after = 0;
        loop {
            let batch = self.list_events(campaign_id, after, REPLAY_BATCH).await?;
            let done = batch.len() < REPLAY_BATCH;
            if let Some(last) = batch.last() {
                after = last.seq;
            }
            journal.extend(batch);
            if done {
                return Ok(journal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_expression_sorted() {
        let filter = EventFilter::default()
            .session_id("sess-1")
            .event_type("campaign.updated")
            .actor_type("gm");
        assert_eq!(
            filter.expression(),
            r#"actor_type = "gm" AND event_type = "campaign.updated" AND session_id = "sess-1""#
        );
        assert_eq!(EventFilter::default().expression(), "");
    }

    #[test]
    fn test_filter_expression_escapes_quotes() {
        let filter = EventFilter::default().entity("campaign", r#"a"b"#);
        assert_eq!(
            filter.expression(),
            r#"entity_id = "a\"b" AND entity_type = "campaign""#
        );
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("seq".parse::<EventOrder>().unwrap(), EventOrder::Ascending);
        assert_eq!("".parse::<EventOrder>().unwrap(), EventOrder::Ascending);
        assert_eq!("SEQ  DESC".parse::<EventOrder>().unwrap(), EventOrder::Descending);
        assert!(matches!(
            "timestamp".parse::<EventOrder>(),
            Err(StoreError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_page_size_bounds() {
        let request = ListEventsRequest::new(CampaignId::new("camp-1"));
        assert_eq!(request.effective_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.clone().page_size(7).effective_page_size(), 7);
        assert_eq!(request.page_size(10_000).effective_page_size(), MAX_PAGE_SIZE);
    }
}
