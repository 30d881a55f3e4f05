//! activate / end / archive / restore.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;

use campaign_ledger_core::Event;

use super::{campaign_event, decode_payload, require_created};
use crate::command::Command;
use crate::events::{self, CampaignUpdated};
use crate::labels::Label;
use crate::rejection::{codes, Rejection};
use crate::state::{CampaignState, CampaignStatus};

/// Commands that only move a campaign between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    Activate,
    End,
    Archive,
    Restore,
}

impl Lifecycle {
    /// Status the command moves the campaign to.
    pub(crate) fn target_status(self) -> CampaignStatus {
        match self {
            Self::Activate => CampaignStatus::Active,
            Self::End => CampaignStatus::Completed,
            Self::Archive => CampaignStatus::Archived,
            Self::Restore => CampaignStatus::Draft,
        }
    }
}

pub(crate) fn decide_lifecycle(
    lifecycle: Lifecycle,
    state: &CampaignState,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Event, Rejection> {
    let target = lifecycle.target_status();
    // Lifecycle payloads carry nothing, but must still be valid JSON.
    let _: IgnoredAny = decode_payload(command)?;
    require_created(state)?;

    if !state.status.can_transition_to(target) {
        return Err(Rejection::new(
            codes::CAMPAIGN_STATUS_TRANSITION,
            format!(
                "{} not allowed from {}",
                command.command_type, state.status
            ),
        ));
    }

    campaign_event(
        command,
        events::CAMPAIGN_UPDATED,
        now,
        &CampaignUpdated::status(target.as_str()),
    )
}
