//! Event hashing and chain linkage.
//!
//! This is the only implementation of event hashing in the workspace. The
//! store's integrity checks and every other call site delegate here, so two
//! computations over the same event always agree.
//!
//! ## Hash-input envelope
//!
//! [`event_hash`] hashes the canonical JSON of:
//!
//! ```text
//! { actor_id, actor_type, campaign_id, causation_id?, correlation_id?,
//!   entity_id?, entity_type?, event_type, invocation_id?, payload,
//!   request_id?, session_id?, system_id?, system_version?, timestamp }
//! ```
//!
//! Optional fields are omitted when `None`. The timestamp is RFC 3339 UTC with
//! a `Z` suffix and automatic sub-second precision.
//!
//! **CRITICAL**: This field set is FROZEN. Extending it invalidates every
//! historical event hash.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::Value;

use crate::canonical::content_hash;
use crate::error::HashError;
use crate::event::Event;

/// Predecessor chain hash for the first event of a campaign.
pub const GENESIS_PREV_HASH: &str = "";

/// The canonical structure hashed by [`event_hash`].
#[derive(Debug, Serialize)]
struct EventHashInput<'a> {
    campaign_id: &'a str,
    event_type: &'a str,
    timestamp: String,
    actor_type: &'a str,
    actor_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invocation_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    causation_id: Option<&'a str>,
    payload: &'a Value,
}

impl<'a> EventHashInput<'a> {
    fn from_event(event: &'a Event) -> Self {
        Self {
            campaign_id: event.campaign_id.as_str(),
            event_type: &event.event_type,
            timestamp: event.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            actor_type: event.actor_type.as_str(),
            actor_id: &event.actor_id,
            session_id: event.session_id.as_deref(),
            request_id: event.request_id.as_deref(),
            invocation_id: event.invocation_id.as_deref(),
            entity_type: event.entity_type.as_deref(),
            entity_id: event.entity_id.as_deref(),
            system_id: event.system_id.as_deref(),
            system_version: event.system_version.as_deref(),
            correlation_id: event.correlation_id.as_deref(),
            causation_id: event.causation_id.as_deref(),
            payload: &event.payload,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChainHashInput<'a> {
    event_hash: &'a str,
    prev_hash: &'a str,
}

/// Compute the content hash of an event's envelope.
pub fn event_hash(event: &Event) -> Result<String, HashError> {
    Ok(content_hash(&EventHashInput::from_event(event))?)
}

/// Compute the chain hash linking an event to its predecessor.
///
/// `prev_hash` is the previous event's chain hash, or [`GENESIS_PREV_HASH`]
/// for the first event. Fails with [`HashError::MissingEventHash`] if
/// `event_hash` is empty.
pub fn chain_hash(event_hash: &str, prev_hash: &str) -> Result<String, HashError> {
    if event_hash.is_empty() {
        return Err(HashError::MissingEventHash);
    }
    Ok(content_hash(&ChainHashInput {
        event_hash,
        prev_hash,
    })?)
}

/// An event paired with its computed hash.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedEvent {
    pub event: Event,
    pub event_hash: String,
}

impl HashedEvent {
    /// Hash an event.
    pub fn new(event: Event) -> Result<Self, HashError> {
        let event_hash = event_hash(&event)?;
        Ok(Self { event, event_hash })
    }

    /// Chain this event onto `prev_hash`.
    pub fn chain_hash(&self, prev_hash: &str) -> Result<String, HashError> {
        chain_hash(&self.event_hash, prev_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActorType, CampaignId};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn base_event() -> Event {
        Event::builder(
            CampaignId::new("camp-1"),
            "campaign.created",
            Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap(),
            ActorType::Participant,
            "user-1",
        )
        .payload(json!({"name": "Sunfall", "game_system": "daggerheart"}))
        .build()
    }

    #[test]
    fn test_event_hash_deterministic() {
        let event = base_event();
        assert_eq!(event_hash(&event).unwrap(), event_hash(&event).unwrap());
        assert_eq!(event_hash(&event).unwrap().len(), 32);
    }

    #[test]
    fn test_event_hash_sensitive_to_session_id() {
        let plain = base_event();
        let mut with_session = base_event();
        with_session.session_id = Some("sess-1".into());
        assert_ne!(event_hash(&plain).unwrap(), event_hash(&with_session).unwrap());
    }

    #[test]
    fn test_absent_differs_from_empty() {
        let plain = base_event();
        let mut empty = base_event();
        empty.correlation_id = Some(String::new());
        assert_ne!(event_hash(&plain).unwrap(), event_hash(&empty).unwrap());
    }

    #[test]
    fn test_event_hash_ignores_payload_key_order() {
        let mut a = base_event();
        a.payload = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        let mut b = base_event();
        b.payload = serde_json::from_str(r#"{"a":2,"b":1}"#).unwrap();
        assert_eq!(event_hash(&a).unwrap(), event_hash(&b).unwrap());
    }

    #[test]
    fn test_event_hash_covers_every_field() {
        let base = event_hash(&base_event()).unwrap();
        let mutations: Vec<fn(&mut Event)> = vec![
            |e| e.campaign_id = CampaignId::new("camp-2"),
            |e| e.event_type = "campaign.updated".into(),
            |e| e.timestamp = e.timestamp + chrono::Duration::milliseconds(1),
            |e| e.actor_type = ActorType::Gm,
            |e| e.actor_id = "user-2".into(),
            |e| e.request_id = Some("r".into()),
            |e| e.invocation_id = Some("i".into()),
            |e| e.entity_type = Some("campaign".into()),
            |e| e.entity_id = Some("camp-1".into()),
            |e| e.system_id = Some("daggerheart".into()),
            |e| e.system_version = Some("1".into()),
            |e| e.causation_id = Some("c".into()),
            |e| e.payload = json!({}),
        ];
        for mutate in mutations {
            let mut event = base_event();
            mutate(&mut event);
            assert_ne!(event_hash(&event).unwrap(), base);
        }
    }

    #[test]
    fn test_chain_hash_requires_event_hash() {
        assert!(matches!(
            chain_hash("", GENESIS_PREV_HASH),
            Err(HashError::MissingEventHash)
        ));
    }

    #[test]
    fn test_chain_hash_deterministic_and_linked() {
        let hashed = HashedEvent::new(base_event()).unwrap();
        let c1 = hashed.chain_hash(GENESIS_PREV_HASH).unwrap();
        let c2 = hashed.chain_hash(GENESIS_PREV_HASH).unwrap();
        assert_eq!(c1, c2);

        let other_prev = hashed.chain_hash("0123456789abcdef0123456789abcdef").unwrap();
        assert_ne!(c1, other_prev);
    }
}
