//! Campaign aggregate command handlers.
//!
//! Each handler decodes its payload, validates it against the current state,
//! and builds exactly one event. Handlers return `Err(Rejection)` for the
//! first violation they find.

mod create;
mod fork;
mod lifecycle;
mod update;

pub(crate) use create::decide_create;
pub(crate) use fork::decide_fork;
pub(crate) use lifecycle::{decide_lifecycle, Lifecycle};
pub(crate) use update::decide_update;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use campaign_ledger_core::Event;

use crate::command::Command;
use crate::events::CAMPAIGN_ENTITY_TYPE;
use crate::rejection::{codes, Rejection};
use crate::state::CampaignState;

/// Locale recorded when a create command omits one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Decode the command payload. An empty payload decodes as `{}`.
fn decode_payload<T: DeserializeOwned>(command: &Command) -> Result<T, Rejection> {
    let raw = command.payload_json.trim();
    let raw = if raw.is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| {
        Rejection::new(
            codes::PAYLOAD_DECODE_FAILED,
            format!("decode {} payload: {e}", command.command_type),
        )
    })
}

fn require_created(state: &CampaignState) -> Result<(), Rejection> {
    if state.created {
        Ok(())
    } else {
        Err(Rejection::new(
            codes::CAMPAIGN_NOT_CREATED,
            "campaign has not been created",
        ))
    }
}

/// Build a campaign event carrying `payload`, stamped with the command
/// envelope and the campaign entity.
fn campaign_event<P: Serialize>(
    command: &Command,
    event_type: &str,
    now: DateTime<Utc>,
    payload: &P,
) -> Result<Event, Rejection> {
    let payload = serde_json::to_value(payload).map_err(|e| {
        Rejection::new(
            codes::PAYLOAD_ENCODE_FAILED,
            format!("encode {event_type} payload: {e}"),
        )
    })?;

    Ok(command
        .event_builder(event_type, now)
        .entity(CAMPAIGN_ENTITY_TYPE, command.campaign_id.as_str())
        .payload(payload)
        .build())
}

/// Trim an optional string, treating blank as absent.
fn trimmed(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
