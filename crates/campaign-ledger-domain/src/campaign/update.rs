use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use campaign_ledger_core::Event;

use super::{campaign_event, decode_payload, require_created};
use crate::catalog::is_cover_asset;
use crate::command::Command;
use crate::events::{self, CampaignUpdated};
use crate::labels::Label;
use crate::rejection::{codes, Rejection};
use crate::state::{CampaignState, CampaignStatus};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateCampaignPayload {
    fields: BTreeMap<String, String>,
}

/// Fields `campaign.update` may change.
pub const UPDATABLE_FIELDS: &[&str] = &["cover_asset_id", "locale", "name", "status", "theme_prompt"];

pub(crate) fn decide_update(
    state: &CampaignState,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Event, Rejection> {
    let payload: UpdateCampaignPayload = decode_payload(command)?;
    require_created(state)?;

    if payload.fields.is_empty() {
        return Err(Rejection::new(
            codes::CAMPAIGN_UPDATE_EMPTY,
            "update requires at least one field",
        ));
    }

    // BTreeMap iteration is sorted, so the first violation is deterministic.
    let mut normalized = BTreeMap::new();
    for (field, value) in &payload.fields {
        let value = normalize_field(state, field, value)?;
        normalized.insert(field.clone(), value);
    }

    campaign_event(
        command,
        events::CAMPAIGN_UPDATED,
        now,
        &CampaignUpdated { fields: normalized },
    )
}

fn normalize_field(state: &CampaignState, field: &str, value: &str) -> Result<String, Rejection> {
    let value = value.trim();
    match field {
        "name" => {
            if value.is_empty() {
                return Err(Rejection::new(
                    codes::CAMPAIGN_NAME_EMPTY,
                    "campaign name is required",
                ));
            }
            Ok(value.to_string())
        }
        "theme_prompt" => Ok(value.to_string()),
        "locale" => {
            if value.is_empty() {
                return Err(Rejection::new(
                    codes::CAMPAIGN_LOCALE_INVALID,
                    "locale must not be blank",
                ));
            }
            Ok(value.to_string())
        }
        "status" => {
            let target = CampaignStatus::parse_label(value).ok_or_else(|| {
                Rejection::new(
                    codes::CAMPAIGN_INVALID_STATUS,
                    format!("unknown campaign status {value:?}"),
                )
            })?;
            if !state.status.can_transition_to(target) {
                return Err(Rejection::new(
                    codes::CAMPAIGN_INVALID_STATUS_TRANSITION,
                    format!("cannot move campaign from {} to {}", state.status, target),
                ));
            }
            Ok(target.as_str().to_string())
        }
        "cover_asset_id" => {
            if !is_cover_asset(value) {
                return Err(Rejection::new(
                    codes::CAMPAIGN_COVER_ASSET_INVALID,
                    format!("unknown cover asset {value:?}"),
                ));
            }
            Ok(value.to_string())
        }
        other => Err(Rejection::new(
            codes::CAMPAIGN_UPDATE_FIELD_INVALID,
            format!(
                "field {other:?} cannot be updated; expected one of {}",
                UPDATABLE_FIELDS.join(", ")
            ),
        )),
    }
}
