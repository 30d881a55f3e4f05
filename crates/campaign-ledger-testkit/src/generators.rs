//! Proptest generators for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Map, Value};

use campaign_ledger_core::{ActorType, CampaignId, Event};
use campaign_ledger_domain::command::types;
use campaign_ledger_domain::Command;
use campaign_ledger_store::{Cursor, Direction, EventFilter};

/// Generate a campaign id.
pub fn campaign_id() -> impl Strategy<Value = CampaignId> {
    "camp-[a-z0-9]{1,12}".prop_map(CampaignId::new)
}

/// Generate an actor type.
pub fn actor_type() -> impl Strategy<Value = ActorType> {
    prop_oneof![
        Just(ActorType::System),
        Just(ActorType::Participant),
        Just(ActorType::Gm),
    ]
}

/// Generate a timestamp with millisecond precision, 2000 to 2100.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800_000i64..4_102_444_800_000i64)
        .prop_map(|ms| Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
}

/// Generate an optional envelope id. `Some("")` is a distinct value.
pub fn optional_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z0-9-]{1,16}".prop_map(Some),
    ]
}

/// Generate an arbitrary JSON value of bounded depth.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
        "\\PC{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a JSON object payload.
pub fn payload() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z_]{1,8}", json_value(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Generate an event type.
pub fn event_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("campaign.created".to_string()),
        Just("campaign.updated".to_string()),
        Just("campaign.forked".to_string()),
        "[a-z]{1,8}\\.[a-z_]{1,12}",
    ]
}

/// Generate an event for `campaign_id`.
pub fn event_for(campaign_id: CampaignId) -> impl Strategy<Value = Event> {
    (
        event_type(),
        timestamp(),
        actor_type(),
        "[a-z0-9-]{0,12}",
        optional_id(),
        optional_id(),
        optional_id(),
        payload(),
    )
        .prop_map(
            move |(event_type, ts, actor_type, actor_id, session, request, correlation, payload)| {
                Event::builder(campaign_id.clone(), event_type, ts, actor_type, actor_id)
                    .session_id(session)
                    .request_id(request)
                    .correlation_id(correlation)
                    .entity("campaign", campaign_id.as_str())
                    .payload(payload)
                    .build()
            },
        )
}

/// Generate an event for a random campaign.
pub fn event() -> impl Strategy<Value = Event> {
    campaign_id().prop_flat_map(event_for)
}

/// Generate a journal's worth of events for one campaign.
pub fn journal(max_len: usize) -> impl Strategy<Value = Vec<Event>> {
    campaign_id().prop_flat_map(move |id| prop::collection::vec(event_for(id), 1..=max_len))
}

/// Generate a command type, including ones the decision engine rejects.
pub fn command_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(types::CAMPAIGN_CREATE.to_string()),
        Just(types::CAMPAIGN_UPDATE.to_string()),
        Just(types::CAMPAIGN_FORK.to_string()),
        Just(types::CAMPAIGN_ACTIVATE.to_string()),
        Just(types::CAMPAIGN_END.to_string()),
        Just(types::CAMPAIGN_ARCHIVE.to_string()),
        Just(types::CAMPAIGN_RESTORE.to_string()),
        "[a-z]{1,8}\\.[a-z]{1,8}",
    ]
}

/// Generate a raw command payload: valid JSON objects, or junk.
pub fn payload_json() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => payload().prop_map(|v| v.to_string()),
        1 => Just(String::new()),
        1 => "[ -~]{0,24}",
    ]
}

/// Generate an arbitrary command.
pub fn command() -> impl Strategy<Value = Command> {
    (
        prop_oneof![Just(CampaignId::new("")), campaign_id()],
        command_type(),
        actor_type(),
        "[a-z0-9-]{0,12}",
        payload_json(),
        optional_id(),
    )
        .prop_map(|(id, command_type, actor_type, actor_id, payload, session)| {
            let command = Command::new(id, command_type, actor_type, actor_id, payload);
            match session {
                Some(session) => command.with_session_id(session),
                None => command,
            }
        })
}

/// Generate an event filter.
pub fn event_filter() -> impl Strategy<Value = EventFilter> {
    (
        prop::option::of(event_type()),
        prop::option::of("sess-[0-9]{1,3}"),
        prop::option::of(actor_type()),
    )
        .prop_map(|(event_type, session, actor)| {
            let mut filter = EventFilter::default();
            if let Some(event_type) = event_type {
                filter = filter.event_type(event_type);
            }
            if let Some(session) = session {
                filter = filter.session_id(session);
            }
            if let Some(actor) = actor {
                filter = filter.actor_type(actor.as_str());
            }
            filter
        })
}

/// Generate a cursor bound to `filter` and `order` expressions.
pub fn cursor_for(filter: String, order: String) -> impl Strategy<Value = Cursor> {
    (
        1u64..=u64::MAX / 2,
        prop_oneof![Just(Direction::Forward), Just(Direction::Backward)],
        any::<bool>(),
    )
        .prop_map(move |(seq, dir, reverse)| Cursor {
            dir,
            reverse,
            ..Cursor::forward(seq, &filter, &order)
        })
}
