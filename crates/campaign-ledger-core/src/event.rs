//! Event: the atomic unit of the campaign journal.
//!
//! An [`Event`] is produced by a decision and is immutable once hashed. The
//! store turns it into a [`CommittedEvent`] by assigning a sequence number,
//! linking it into the chain and signing the chain hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ActorType, CampaignId};

/// An uncommitted domain event.
///
/// Optional envelope fields are hash-significant by presence: `None` and
/// `Some("")` produce different event hashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub campaign_id: CampaignId,

    #[serde(rename = "type")]
    pub event_type: String,

    /// When the decision was made (UTC).
    pub timestamp: DateTime<Utc>,

    pub actor_type: ActorType,
    pub actor_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<String>,

    /// Event-type-specific payload.
    pub payload: Value,
}

impl Event {
    /// Start building an event with the required envelope fields.
    pub fn builder(
        campaign_id: CampaignId,
        event_type: impl Into<String>,
        timestamp: DateTime<Utc>,
        actor_type: ActorType,
        actor_id: impl Into<String>,
    ) -> EventBuilder {
        EventBuilder::new(campaign_id, event_type, timestamp, actor_type, actor_id)
    }
}

/// Builder for [`Event`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    /// Create a builder with the required fields and a `null` payload.
    pub fn new(
        campaign_id: CampaignId,
        event_type: impl Into<String>,
        timestamp: DateTime<Utc>,
        actor_type: ActorType,
        actor_id: impl Into<String>,
    ) -> Self {
        Self {
            event: Event {
                campaign_id,
                event_type: event_type.into(),
                timestamp,
                actor_type,
                actor_id: actor_id.into(),
                session_id: None,
                request_id: None,
                invocation_id: None,
                entity_type: None,
                entity_id: None,
                system_id: None,
                system_version: None,
                correlation_id: None,
                causation_id: None,
                payload: Value::Null,
            },
        }
    }

    pub fn session_id(mut self, id: Option<String>) -> Self {
        self.event.session_id = id;
        self
    }

    pub fn request_id(mut self, id: Option<String>) -> Self {
        self.event.request_id = id;
        self
    }

    pub fn invocation_id(mut self, id: Option<String>) -> Self {
        self.event.invocation_id = id;
        self
    }

    /// Set the entity the event is about.
    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.event.entity_type = Some(entity_type.into());
        self.event.entity_id = Some(entity_id.into());
        self
    }

    pub fn entity_type(mut self, entity_type: Option<String>) -> Self {
        self.event.entity_type = entity_type;
        self
    }

    pub fn entity_id(mut self, entity_id: Option<String>) -> Self {
        self.event.entity_id = entity_id;
        self
    }

    /// Set the game system that owns the payload.
    pub fn system(mut self, system_id: Option<String>, system_version: Option<String>) -> Self {
        self.event.system_id = system_id;
        self.event.system_version = system_version;
        self
    }

    pub fn correlation_id(mut self, id: Option<String>) -> Self {
        self.event.correlation_id = id;
        self
    }

    pub fn causation_id(mut self, id: Option<String>) -> Self {
        self.event.causation_id = id;
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.event.payload = payload;
        self
    }

    /// Finish the event.
    pub fn build(self) -> Event {
        self.event
    }
}

/// An event as persisted by the store.
///
/// Created exactly once, by the store, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedEvent {
    #[serde(flatten)]
    pub event: Event,

    /// Position in the campaign's journal (1-indexed, gapless).
    pub seq: u64,

    /// Content hash of the event envelope.
    pub event_hash: String,

    /// Chain hash of the previous event (empty for seq 1).
    pub prev_event_hash: String,

    /// Hash binding this event to its predecessor.
    pub chain_hash: String,

    /// Root key id used to sign the chain hash.
    pub signature_key_id: String,

    /// Hex HMAC-SHA256 of the chain hash under the derived campaign key.
    pub signature: String,
}

impl CommittedEvent {
    pub fn campaign_id(&self) -> &CampaignId {
        &self.event.campaign_id
    }

    pub fn event_type(&self) -> &str {
        &self.event.event_type
    }

    /// True if this is the first event of its campaign.
    pub fn is_genesis(&self) -> bool {
        self.seq == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Event {
        Event::builder(
            CampaignId::new("camp-1"),
            "campaign.created",
            Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap(),
            ActorType::Participant,
            "user-1",
        )
        .entity("campaign", "camp-1")
        .session_id(Some("sess-1".into()))
        .payload(json!({"name": "Sunfall"}))
        .build()
    }

    #[test]
    fn test_builder_sets_fields() {
        let event = sample();
        assert_eq!(event.event_type, "campaign.created");
        assert_eq!(event.entity_type.as_deref(), Some("campaign"));
        assert_eq!(event.entity_id.as_deref(), Some("camp-1"));
        assert_eq!(event.session_id.as_deref(), Some("sess-1"));
        assert_eq!(event.request_id, None);
    }

    #[test]
    fn test_event_json_roundtrip_keeps_absent_fields_absent() {
        let event = sample();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "campaign.created");
        assert!(json.get("request_id").is_none());

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_committed_event_flattens_envelope() {
        let committed = CommittedEvent {
            event: sample(),
            seq: 1,
            event_hash: "aa".into(),
            prev_event_hash: String::new(),
            chain_hash: "bb".into(),
            signature_key_id: "v1".into(),
            signature: "cc".into(),
        };
        let json = serde_json::to_value(&committed).unwrap();
        assert_eq!(json["campaign_id"], "camp-1");
        assert_eq!(json["seq"], 1);
        assert!(committed.is_genesis());

        let back: CommittedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, committed);
    }
}
