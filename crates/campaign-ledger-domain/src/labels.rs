//! Enum labels accepted in command payloads.
//!
//! Clients send either the bare name (`daggerheart`, `Human`) or the
//! service-prefixed form (`GAME_SYSTEM_DAGGERHEART`, `GM_MODE_HUMAN`), in any
//! case. Labels are normalized to the lower-case bare name before validation,
//! and only the normalized name is written into events. `*_UNSPECIFIED`
//! never resolves.

use serde::{Deserialize, Serialize};

/// A closed set of labels with a service prefix.
pub trait Label: Sized + Copy + 'static {
    /// Upper-case prefix of the service form, including the trailing `_`.
    const PREFIX: &'static str;

    /// Every resolvable value.
    const ALL: &'static [Self];

    /// Normalized bare name.
    fn as_str(self) -> &'static str;

    /// Resolve a raw label.
    fn parse_label(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix(Self::PREFIX).unwrap_or(&upper);
        if bare.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str().eq_ignore_ascii_case(bare))
    }
}

/// Game system a campaign is played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSystem {
    Daggerheart,
}

impl Label for GameSystem {
    const PREFIX: &'static str = "GAME_SYSTEM_";
    const ALL: &'static [Self] = &[Self::Daggerheart];

    fn as_str(self) -> &'static str {
        match self {
            Self::Daggerheart => "daggerheart",
        }
    }
}

/// Who runs the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GmMode {
    Human,
    Ai,
    Hybrid,
}

impl Label for GmMode {
    const PREFIX: &'static str = "GM_MODE_";
    const ALL: &'static [Self] = &[Self::Human, Self::Ai, Self::Hybrid];

    fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Ai => "ai",
            Self::Hybrid => "hybrid",
        }
    }
}

/// Why the campaign exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignIntent {
    Standard,
    Starter,
    Sandbox,
}

impl Label for CampaignIntent {
    const PREFIX: &'static str = "CAMPAIGN_INTENT_";
    const ALL: &'static [Self] = &[Self::Standard, Self::Starter, Self::Sandbox];

    fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Starter => "starter",
            Self::Sandbox => "sandbox",
        }
    }
}

/// Who may discover and join the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    Private,
    Restricted,
    Public,
}

impl Label for AccessPolicy {
    const PREFIX: &'static str = "CAMPAIGN_ACCESS_POLICY_";
    const ALL: &'static [Self] = &[Self::Private, Self::Restricted, Self::Public];

    fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Restricted => "restricted",
            Self::Public => "public",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_and_bare_forms() {
        assert_eq!(
            GameSystem::parse_label("GAME_SYSTEM_DAGGERHEART"),
            Some(GameSystem::Daggerheart)
        );
        assert_eq!(
            GameSystem::parse_label("daggerheart"),
            Some(GameSystem::Daggerheart)
        );
        assert_eq!(
            GameSystem::parse_label("  game_system_DaggerHeart "),
            Some(GameSystem::Daggerheart)
        );
        assert_eq!(GmMode::parse_label("GM_MODE_HUMAN"), Some(GmMode::Human));
        assert_eq!(GmMode::parse_label("ai"), Some(GmMode::Ai));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(GameSystem::parse_label(""), None);
        assert_eq!(GameSystem::parse_label("GAME_SYSTEM_"), None);
        assert_eq!(GameSystem::parse_label("GAME_SYSTEM_UNSPECIFIED"), None);
        assert_eq!(GameSystem::parse_label("pathfinder"), None);
        assert_eq!(GmMode::parse_label("GAME_SYSTEM_HUMAN"), None);
    }

    #[test]
    fn test_serde_matches_label() {
        for value in AccessPolicy::ALL {
            let json = serde_json::to_string(value).unwrap();
            assert_eq!(json, format!("\"{}\"", value.as_str()));
        }
        for value in CampaignIntent::ALL {
            assert_eq!(CampaignIntent::parse_label(value.as_str()), Some(*value));
        }
    }
}
