//! Ledger configuration.
//!
//! The only place in the workspace that reads the environment.

use campaign_ledger_keyring::KeyringConfig;
use campaign_ledger_store::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{LedgerError, Result};

/// Single root HMAC secret.
pub const ENV_HMAC_KEY: &str = "CAMPAIGN_LEDGER_HMAC_KEY";
/// Rotation list, `id=secret[,id=secret...]`.
pub const ENV_HMAC_KEYS: &str = "CAMPAIGN_LEDGER_HMAC_KEYS";
/// Active key id.
pub const ENV_HMAC_KEY_ID: &str = "CAMPAIGN_LEDGER_HMAC_KEY_ID";
/// Default page size for listings.
pub const ENV_PAGE_SIZE: &str = "CAMPAIGN_LEDGER_PAGE_SIZE";
/// `true`/`false`: verify signatures of listed events.
pub const ENV_VERIFY_ON_READ: &str = "CAMPAIGN_LEDGER_VERIFY_ON_READ";

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Root keys used to sign and verify chain hashes.
    pub keyring: KeyringConfig,
    /// Page size for listings that do not set one.
    pub default_page_size: usize,
    /// Whether to verify signatures of events returned by listings.
    pub verify_on_read: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            keyring: KeyringConfig::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            verify_on_read: true,
        }
    }
}

impl LedgerConfig {
    /// Config with a single root secret and defaults elsewhere.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            keyring: KeyringConfig::single(secret),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Unset and blank values keep
    /// their defaults. Secrets are passed on untrimmed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secret = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self {
            keyring: KeyringConfig {
                hmac_key: secret(ENV_HMAC_KEY),
                hmac_keys: secret(ENV_HMAC_KEYS),
                active_key_id: get(ENV_HMAC_KEY_ID),
            },
            ..Self::default()
        };

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            let size: usize = raw
                .parse()
                .map_err(|_| LedgerError::Config(format!("{ENV_PAGE_SIZE}: not a number: {raw:?}")))?;
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(LedgerError::Config(format!(
                    "{ENV_PAGE_SIZE}: must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                )));
            }
            config.default_page_size = size;
        }

        if let Some(raw) = get(ENV_VERIFY_ON_READ) {
            config.verify_on_read = match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(LedgerError::Config(format!(
                        "{ENV_VERIFY_ON_READ}: expected a boolean, got {raw:?}"
                    )))
                }
            };
        }

        Ok(config)
    }
}
