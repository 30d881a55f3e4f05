//! Rejections: coded, user-facing refusals to apply a command.
//!
//! Rejections are data, never errors. Transport layers map the codes to
//! client-facing errors, so the strings in [`codes`] are a stable contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable rejection codes.
///
/// Changing any of these strings is a breaking change for API clients.
pub mod codes {
    pub const COMMAND_TYPE_UNSUPPORTED: &str = "COMMAND_TYPE_UNSUPPORTED";
    pub const PAYLOAD_DECODE_FAILED: &str = "PAYLOAD_DECODE_FAILED";
    pub const PAYLOAD_ENCODE_FAILED: &str = "PAYLOAD_ENCODE_FAILED";
    pub const CAMPAIGN_ID_REQUIRED: &str = "CAMPAIGN_ID_REQUIRED";

    pub const CAMPAIGN_ALREADY_EXISTS: &str = "CAMPAIGN_ALREADY_EXISTS";
    pub const CAMPAIGN_NOT_CREATED: &str = "CAMPAIGN_NOT_CREATED";

    pub const CAMPAIGN_NAME_EMPTY: &str = "CAMPAIGN_NAME_EMPTY";
    pub const CAMPAIGN_GAME_SYSTEM_INVALID: &str = "CAMPAIGN_GAME_SYSTEM_INVALID";
    pub const CAMPAIGN_GM_MODE_INVALID: &str = "CAMPAIGN_GM_MODE_INVALID";
    pub const CAMPAIGN_INTENT_INVALID: &str = "CAMPAIGN_INTENT_INVALID";
    pub const CAMPAIGN_ACCESS_POLICY_INVALID: &str = "CAMPAIGN_ACCESS_POLICY_INVALID";
    pub const CAMPAIGN_COVER_ASSET_INVALID: &str = "CAMPAIGN_COVER_ASSET_INVALID";
    pub const CAMPAIGN_LOCALE_INVALID: &str = "CAMPAIGN_LOCALE_INVALID";

    pub const CAMPAIGN_UPDATE_EMPTY: &str = "CAMPAIGN_UPDATE_EMPTY";
    pub const CAMPAIGN_UPDATE_FIELD_INVALID: &str = "CAMPAIGN_UPDATE_FIELD_INVALID";
    pub const CAMPAIGN_INVALID_STATUS: &str = "CAMPAIGN_INVALID_STATUS";
    pub const CAMPAIGN_INVALID_STATUS_TRANSITION: &str = "CAMPAIGN_INVALID_STATUS_TRANSITION";

    /// Lifecycle commands (activate, end, archive, restore) from an illegal status.
    pub const CAMPAIGN_STATUS_TRANSITION: &str = "CAMPAIGN_STATUS_TRANSITION";
}

/// A coded refusal to apply a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl Rejection {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// True if this rejection carries `code`.
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
