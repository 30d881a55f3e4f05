use chrono::{DateTime, Utc};
use serde::Deserialize;

use campaign_ledger_core::Event;

use super::{campaign_event, decode_payload, trimmed, DEFAULT_LOCALE};
use crate::catalog::{default_cover_asset, is_cover_asset};
use crate::command::Command;
use crate::events::{self, CampaignCreated};
use crate::labels::{AccessPolicy, CampaignIntent, GameSystem, GmMode, Label};
use crate::rejection::{codes, Rejection};
use crate::state::{CampaignState, CampaignStatus};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateCampaignPayload {
    name: String,
    game_system: String,
    gm_mode: String,
    cover_asset_id: Option<String>,
    intent: Option<String>,
    access_policy: Option<String>,
    locale: Option<String>,
    theme_prompt: Option<String>,
}

pub(crate) fn decide_create(
    state: &CampaignState,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Event, Rejection> {
    let payload: CreateCampaignPayload = decode_payload(command)?;

    if state.created {
        return Err(Rejection::new(
            codes::CAMPAIGN_ALREADY_EXISTS,
            format!("campaign {} already exists", command.campaign_id),
        ));
    }

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(Rejection::new(
            codes::CAMPAIGN_NAME_EMPTY,
            "campaign name is required",
        ));
    }

    let game_system = required_label::<GameSystem>(
        &payload.game_system,
        codes::CAMPAIGN_GAME_SYSTEM_INVALID,
        "game system",
    )?;
    let gm_mode =
        required_label::<GmMode>(&payload.gm_mode, codes::CAMPAIGN_GM_MODE_INVALID, "gm mode")?;
    let intent = optional_label(
        payload.intent.as_deref(),
        CampaignIntent::Standard,
        codes::CAMPAIGN_INTENT_INVALID,
        "intent",
    )?;
    let access_policy = optional_label(
        payload.access_policy.as_deref(),
        AccessPolicy::Private,
        codes::CAMPAIGN_ACCESS_POLICY_INVALID,
        "access policy",
    )?;

    let cover_asset_id = match trimmed(payload.cover_asset_id.as_deref()) {
        Some(id) if is_cover_asset(id) => id.to_string(),
        Some(id) => {
            return Err(Rejection::new(
                codes::CAMPAIGN_COVER_ASSET_INVALID,
                format!("unknown cover asset {id:?}"),
            ))
        }
        None => default_cover_asset(command.campaign_id.as_str()).to_string(),
    };

    let created = CampaignCreated {
        name: name.to_string(),
        game_system: game_system.as_str().to_string(),
        gm_mode: gm_mode.as_str().to_string(),
        status: CampaignStatus::Draft.as_str().to_string(),
        intent: intent.as_str().to_string(),
        access_policy: access_policy.as_str().to_string(),
        locale: trimmed(payload.locale.as_deref())
            .unwrap_or(DEFAULT_LOCALE)
            .to_string(),
        theme_prompt: trimmed(payload.theme_prompt.as_deref()).map(str::to_string),
        cover_asset_id,
    };

    campaign_event(command, events::CAMPAIGN_CREATED, now, &created)
}

fn required_label<L: Label>(raw: &str, code: &str, what: &str) -> Result<L, Rejection> {
    L::parse_label(raw).ok_or_else(|| Rejection::new(code, format!("unsupported {what} {raw:?}")))
}

fn optional_label<L: Label>(
    raw: Option<&str>,
    default: L,
    code: &str,
    what: &str,
) -> Result<L, Rejection> {
    match trimmed(raw) {
        Some(raw) => required_label(raw, code, what),
        None => Ok(default),
    }
}
