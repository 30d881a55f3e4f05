//! Campaign state: the projection the decision engine reads.

use serde::{Deserialize, Serialize};
use std::fmt;

use campaign_ledger_core::Event;

use crate::events::{self, CampaignUpdated};
use crate::labels::Label;

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Not yet created. Never a valid target.
    #[default]
    Unspecified,
    Draft,
    Active,
    Completed,
    Archived,
}

impl CampaignStatus {
    /// Whether the lifecycle permits moving from `self` to `to`.
    ///
    /// ```text
    /// Draft    -> Active | Archived
    /// Active   -> Completed | Archived
    /// Archived -> Draft
    /// ```
    pub fn can_transition_to(self, to: CampaignStatus) -> bool {
        use CampaignStatus::*;
        matches!(
            (self, to),
            (Draft, Active) | (Draft, Archived) | (Active, Completed) | (Active, Archived) | (Archived, Draft)
        )
    }
}

impl Label for CampaignStatus {
    const PREFIX: &'static str = "CAMPAIGN_STATUS_";
    const ALL: &'static [Self] = &[Self::Draft, Self::Active, Self::Completed, Self::Archived];

    fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the decision engine knows about a campaign.
///
/// Rehydration is the caller's job: fold the journal through [`apply`](Self::apply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignState {
    pub created: bool,
    pub status: CampaignStatus,
}

impl CampaignState {
    /// State of a campaign that was created and is in `status`.
    pub fn with_status(status: CampaignStatus) -> Self {
        Self {
            created: true,
            status,
        }
    }

    /// Fold one event into the state.
    ///
    /// Unknown event types and unparseable status labels leave the state
    /// unchanged.
    pub fn apply(&mut self, event: &Event) {
        match event.event_type.as_str() {
            events::CAMPAIGN_CREATED => {
                self.created = true;
                self.status = CampaignStatus::Draft;
            }
            events::CAMPAIGN_UPDATED => {
                let status = serde_json::from_value::<CampaignUpdated>(event.payload.clone())
                    .ok()
                    .and_then(|updated| updated.fields.get("status").cloned())
                    .and_then(|label| CampaignStatus::parse_label(&label));
                if let Some(status) = status {
                    self.status = status;
                }
            }
            _ => {}
        }
    }

    /// Fold a sequence of events into a fresh state.
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut state = Self::default();
        for event in events {
            state.apply(event);
        }
        state
    }
}
