use chrono::{DateTime, Utc};

use campaign_ledger_core::Event;

use super::{campaign_event, decode_payload, require_created};
use crate::command::Command;
use crate::events::{self, CampaignForked};
use crate::rejection::Rejection;
use crate::state::CampaignState;

/// Record fork lineage on an existing campaign.
///
/// The payload must hold exactly the [`CampaignForked`] fields; missing or
/// extra keys fail decoding.
pub(crate) fn decide_fork(
    state: &CampaignState,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Event, Rejection> {
    let payload: CampaignForked = decode_payload(command)?;
    require_created(state)?;
    campaign_event(command, events::CAMPAIGN_FORKED, now, &payload)
}
