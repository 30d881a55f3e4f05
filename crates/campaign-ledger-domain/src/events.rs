//! Campaign event types and payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CAMPAIGN_CREATED: &str = "campaign.created";
pub const CAMPAIGN_UPDATED: &str = "campaign.updated";
pub const CAMPAIGN_FORKED: &str = "campaign.forked";

/// Entity type stamped on every campaign event.
pub const CAMPAIGN_ENTITY_TYPE: &str = "campaign";

/// Payload of `campaign.created`. All labels are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub name: String,
    pub game_system: String,
    pub gm_mode: String,
    pub status: String,
    pub intent: String,
    pub access_policy: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_prompt: Option<String>,
    pub cover_asset_id: String,
}

/// Payload of `campaign.updated`: the normalized fields that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignUpdated {
    pub fields: BTreeMap<String, String>,
}

impl CampaignUpdated {
    pub fn status(status: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("status".to_string(), status.to_string());
        Self { fields }
    }
}

/// Payload of `campaign.forked`.
///
/// All four fields are required and nothing else is accepted, so the event
/// carries exactly what the command sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignForked {
    pub parent_campaign_id: String,
    pub fork_event_seq: u64,
    pub origin_campaign_id: String,
    pub copy_participants: bool,
}
