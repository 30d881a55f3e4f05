//! Commands: requests to change a campaign.

use serde::{Deserialize, Serialize};

use campaign_ledger_core::{ActorType, CampaignId, EventBuilder};
use chrono::{DateTime, Utc};

/// Command type strings.
pub mod types {
    pub const CAMPAIGN_CREATE: &str = "campaign.create";
    pub const CAMPAIGN_UPDATE: &str = "campaign.update";
    pub const CAMPAIGN_ACTIVATE: &str = "campaign.activate";
    pub const CAMPAIGN_END: &str = "campaign.end";
    pub const CAMPAIGN_ARCHIVE: &str = "campaign.archive";
    pub const CAMPAIGN_RESTORE: &str = "campaign.restore";
    pub const CAMPAIGN_FORK: &str = "campaign.fork";
}

/// The command types the decision engine handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Create,
    Update,
    Activate,
    End,
    Archive,
    Restore,
    Fork,
}

impl CommandKind {
    /// Resolve a command type string. Matching is exact.
    pub fn parse(command_type: &str) -> Option<Self> {
        match command_type {
            types::CAMPAIGN_CREATE => Some(Self::Create),
            types::CAMPAIGN_UPDATE => Some(Self::Update),
            types::CAMPAIGN_ACTIVATE => Some(Self::Activate),
            types::CAMPAIGN_END => Some(Self::End),
            types::CAMPAIGN_ARCHIVE => Some(Self::Archive),
            types::CAMPAIGN_RESTORE => Some(Self::Restore),
            types::CAMPAIGN_FORK => Some(Self::Fork),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => types::CAMPAIGN_CREATE,
            Self::Update => types::CAMPAIGN_UPDATE,
            Self::Activate => types::CAMPAIGN_ACTIVATE,
            Self::End => types::CAMPAIGN_END,
            Self::Archive => types::CAMPAIGN_ARCHIVE,
            Self::Restore => types::CAMPAIGN_RESTORE,
            Self::Fork => types::CAMPAIGN_FORK,
        }
    }
}

/// An immutable request to change one campaign.
///
/// `payload_json` is carried as raw text and decoded by the handler for the
/// command type, so malformed payloads surface as rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub campaign_id: CampaignId,

    #[serde(rename = "type")]
    pub command_type: String,

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

    #[serde(default)]
    pub payload_json: String,
}

impl Command {
    pub fn new(
        campaign_id: CampaignId,
        command_type: impl Into<String>,
        actor_type: ActorType,
        actor_id: impl Into<String>,
        payload_json: impl Into<String>,
    ) -> Self {
        Self {
            campaign_id,
            command_type: command_type.into(),
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
            payload_json: payload_json.into(),
        }
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_invocation_id(mut self, id: impl Into<String>) -> Self {
        self.invocation_id = Some(id.into());
        self
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_system(mut self, system_id: impl Into<String>, system_version: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self.system_version = Some(system_version.into());
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_causation_id(mut self, id: impl Into<String>) -> Self {
        self.causation_id = Some(id.into());
        self
    }

    /// Start an event that copies this command's envelope.
    ///
    /// Entity fields are copied too; aggregate handlers overwrite them with
    /// their own entity.
    pub fn event_builder(&self, event_type: &str, timestamp: DateTime<Utc>) -> EventBuilder {
        EventBuilder::new(
            self.campaign_id.clone(),
            event_type,
            timestamp,
            self.actor_type,
            self.actor_id.clone(),
        )
        .session_id(self.session_id.clone())
        .request_id(self.request_id.clone())
        .invocation_id(self.invocation_id.clone())
        .entity_type(self.entity_type.clone())
        .entity_id(self.entity_id.clone())
        .system(self.system_id.clone(), self.system_version.clone())
        .correlation_id(self.correlation_id.clone())
        .causation_id(self.causation_id.clone())
    }
}
