//! In-memory implementation of the Store trait.
//!
//! Exercises the full append and pagination contract without persistence.
//! All data is lost when the store is dropped.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use campaign_ledger_core::{CampaignId, CommittedEvent, Event, HashedEvent};
use campaign_ledger_keyring::Keyring;

use crate::cursor::{
    decode_cursor, encode_cursor, validate_filter_hash, validate_order_hash, Cursor, Direction,
};
use crate::error::{Result, StoreError};
use crate::seal::seal_event;
use crate::traits::{EventPage, ExpectedHead, JournalHead, ListEventsRequest, Store};

/// In-memory store.
///
/// Thread-safe via RwLock. Appends take the write lock for the whole
/// head-read, seal, push sequence, so appends to one campaign are serialized.
pub struct MemoryStore {
    keyring: Option<Arc<Keyring>>,
    inner: RwLock<HashMap<CampaignId, Vec<CommittedEvent>>>,
}

impl MemoryStore {
    /// Store without a keyring. Every append fails until one is configured.
    pub fn new() -> Self {
        Self {
            keyring: None,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Store that signs chain hashes with `keyring`.
    pub fn with_keyring(keyring: Arc<Keyring>) -> Self {
        Self {
            keyring: Some(keyring),
            ..Self::new()
        }
    }

    pub fn keyring(&self) -> Option<&Arc<Keyring>> {
        self.keyring.as_ref()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<CampaignId, Vec<CommittedEvent>>>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<CampaignId, Vec<CommittedEvent>>>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn require_campaign(campaign_id: &CampaignId) -> Result<()> {
    if campaign_id.is_blank() {
        return Err(StoreError::InvalidRequest("campaign id is required".into()));
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn append_event(&self, event: &Event, expected: ExpectedHead) -> Result<CommittedEvent> {
        require_campaign(&event.campaign_id)?;
        let hashed = HashedEvent::new(event.clone())?;

        let mut journals = self.write()?;
        let head = journals
            .get(&event.campaign_id)
            .and_then(|journal| journal.last())
            .map(JournalHead::of)
            .unwrap_or_default();

        if let ExpectedHead::Seq(expected) = expected {
            if expected != head.seq {
                tracing::debug!(
                    campaign_id = %event.campaign_id,
                    expected,
                    actual = head.seq,
                    "append conflict"
                );
                return Err(StoreError::Conflict {
                    campaign_id: event.campaign_id.to_string(),
                    expected,
                    actual: head.seq,
                });
            }
        }

        let committed = seal_event(hashed, &head, self.keyring.as_deref())?;
        journals
            .entry(event.campaign_id.clone())
            .or_default()
            .push(committed.clone());

        tracing::debug!(
            campaign_id = %committed.campaign_id(),
            seq = committed.seq,
            event_type = %committed.event_type(),
            "event appended"
        );
        Ok(committed)
    }

    async fn get_event(&self, campaign_id: &CampaignId, seq: u64) -> Result<Option<CommittedEvent>> {
        let journals = self.read()?;
        Ok(seq
            .checked_sub(1)
            .and_then(|index| journals.get(campaign_id)?.get(index as usize))
            .cloned())
    }

    async fn list_events(
        &self,
        campaign_id: &CampaignId,
        after_seq: u64,
        limit: usize,
    ) -> Result<Vec<CommittedEvent>> {
        let journals = self.read()?;
        Ok(journals
            .get(campaign_id)
            .map(|journal| {
                journal
                    .iter()
                    .filter(|e| e.seq > after_seq)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_events_page(&self, request: &ListEventsRequest) -> Result<EventPage> {
        require_campaign(&request.campaign_id)?;

        let page_size = request.effective_page_size();
        let filter = request.filter.expression();
        let order = request.order.expression();
        let descending = request.order.is_descending();

        let cursor = match request.page_token.as_deref() {
            Some(token) => {
                let cursor = decode_cursor(token)?;
                validate_filter_hash(&cursor, &filter)?;
                validate_order_hash(&cursor, order)?;
                Some(cursor)
            }
            None => None,
        };

        let journals = self.read()?;
        let matching: Vec<&CommittedEvent> = journals
            .get(&request.campaign_id)
            .map(|journal| journal.iter().filter(|e| request.filter.matches(e)).collect())
            .unwrap_or_default();

        let (dir, boundary, reverse) = match &cursor {
            Some(c) => (c.dir, Some(c.seq), c.reverse),
            None if descending => (Direction::Backward, None, false),
            None => (Direction::Forward, None, false),
        };

        let mut events: Vec<CommittedEvent> = match dir {
            Direction::Forward => matching
                .iter()
                .filter(|e| boundary.map_or(true, |b| e.seq > b))
                .take(page_size)
                .map(|e| (*e).clone())
                .collect(),
            Direction::Backward => matching
                .iter()
                .rev()
                .filter(|e| boundary.map_or(true, |b| e.seq < b))
                .take(page_size)
                .map(|e| (*e).clone())
                .collect(),
        };
        if reverse {
            events.reverse();
        }

        // Seq range the page covers. An empty page past a cursor still sits
        // next to the cursor, so neighbours are judged from that edge.
        let span = match (events.iter().map(|e| e.seq).min(), events.iter().map(|e| e.seq).max()) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => boundary.map(|b| match dir {
                Direction::Forward => (b.saturating_add(1), b.saturating_add(1)),
                Direction::Backward => (b.saturating_sub(1), b.saturating_sub(1)),
            }),
        };
        let (below, above) = match span {
            Some((lo, hi)) => (
                matching.iter().any(|e| e.seq < lo),
                matching.iter().any(|e| e.seq > hi),
            ),
            None => (false, false),
        };

        // Neighbours and anchors in display order.
        let (has_prev_page, has_next_page) = if descending {
            (above, below)
        } else {
            (below, above)
        };
        let anchors = span.map(|(lo, hi)| if descending { (hi, lo) } else { (lo, hi) });

        let next_page_token = match anchors {
            Some((_, last)) if has_next_page => Some(encode_cursor(&Cursor::next_page(
                last, descending, &filter, order,
            ))?),
            _ => None,
        };
        let prev_page_token = match anchors {
            Some((first, _)) if has_prev_page => Some(encode_cursor(&Cursor::prev_page(
                first, descending, &filter, order,
            ))?),
            _ => None,
        };

        Ok(EventPage {
            total_count: matching.len() as u64,
            events,
            has_next_page,
            has_prev_page,
            next_page_token,
            prev_page_token,
        })
    }

    async fn head(&self, campaign_id: &CampaignId) -> Result<JournalHead> {
        let journals = self.read()?;
        Ok(journals
            .get(campaign_id)
            .and_then(|journal| journal.last())
            .map(JournalHead::of)
            .unwrap_or_default())
    }
}
