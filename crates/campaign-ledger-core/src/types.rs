//! Strong type definitions for the campaign ledger.
//!
//! Identifiers are newtypes so a campaign id cannot be passed where an actor
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a campaign aggregate.
///
/// Scopes the event stream, sequence numbers and the derived signing key.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CampaignId({})", self.0)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CampaignId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CampaignId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CampaignId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Who issued a command (and therefore authored its events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    /// The platform itself (migrations, schedulers, forks).
    System,
    /// A player participating in the campaign.
    Participant,
    /// A game master, human or AI.
    Gm,
}

impl ActorType {
    /// Stable string form used in the hash envelope and filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Participant => "participant",
            Self::Gm => "gm",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "participant" => Ok(Self::Participant),
            "gm" => Ok(Self::Gm),
            other => Err(format!("unknown actor type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_id_blank() {
        assert!(CampaignId::new("").is_blank());
        assert!(CampaignId::new("  \t").is_blank());
        assert!(!CampaignId::new("camp-1").is_blank());
    }

    #[test]
    fn test_campaign_id_serializes_as_string() {
        let id = CampaignId::new("camp-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"camp-1\"");
    }

    #[test]
    fn test_actor_type_roundtrip() {
        for actor in [ActorType::System, ActorType::Participant, ActorType::Gm] {
            let parsed: ActorType = actor.as_str().parse().unwrap();
            assert_eq!(parsed, actor);
            let json = serde_json::to_string(&actor).unwrap();
            assert_eq!(json, format!("\"{}\"", actor.as_str()));
        }
        assert!("narrator".parse::<ActorType>().is_err());
    }
}
