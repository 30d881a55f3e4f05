//! Keyring configuration.
//!
//! Two forms are accepted and may be combined:
//!
//! - a single secret, registered under the active key id;
//! - a multi-key list `id=secret[,id=secret...]` for rotation.
//!
//! Reading these values from the environment is the composition root's job.
//! This module only turns explicit values into a [`Keyring`].

use std::fmt;

use crate::error::{KeyringError, Result};
use crate::keyring::Keyring;

/// Key id used when no active key id is configured.
pub const DEFAULT_KEY_ID: &str = "v1";

/// Explicit keyring settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyringConfig {
    /// Single-key form.
    pub hmac_key: Option<String>,
    /// Multi-key form: `id=secret[,id=secret...]`.
    pub hmac_keys: Option<String>,
    /// Active key id; defaults to [`DEFAULT_KEY_ID`].
    pub active_key_id: Option<String>,
}

impl KeyringConfig {
    /// Config with a single secret under the default key id.
    pub fn single(secret: impl Into<String>) -> Self {
        Self {
            hmac_key: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Config from a multi-key spec and an active key id.
    pub fn rotating(specs: impl Into<String>, active_key_id: impl Into<String>) -> Self {
        Self {
            hmac_keys: Some(specs.into()),
            active_key_id: Some(active_key_id.into()),
            ..Self::default()
        }
    }

    /// The active key id after defaulting.
    pub fn resolved_active_key_id(&self) -> &str {
        match self.active_key_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => DEFAULT_KEY_ID,
        }
    }

    /// Build the keyring.
    pub fn build(&self) -> Result<Keyring> {
        let active = self.resolved_active_key_id();

        let mut keys = match self.hmac_keys.as_deref() {
            Some(specs) => parse_key_specs(specs)?,
            None => Vec::new(),
        };

        if let Some(secret) = self.hmac_key.as_deref() {
            if !secret.trim().is_empty() {
                check_secret_padding(active, secret)?;
                if keys.iter().any(|(id, _)| id == active) {
                    return Err(KeyringError::InvalidKeySpec(format!(
                        "key id {active:?} configured twice"
                    )));
                }
                keys.push((active.to_string(), secret.as_bytes().to_vec()));
            }
        }

        Keyring::new(keys, active)
    }
}

impl fmt::Debug for KeyringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_ids: Vec<String> = self
            .hmac_keys
            .as_deref()
            .and_then(|specs| parse_key_specs(specs).ok())
            .map(|keys| keys.into_iter().map(|(id, _)| id).collect())
            .unwrap_or_default();

        f.debug_struct("KeyringConfig")
            .field("hmac_key", &self.hmac_key.as_ref().map(|_| "<redacted>"))
            .field("hmac_keys", &key_ids)
            .field("active_key_id", &self.resolved_active_key_id())
            .finish()
    }
}

/// Parse `id=secret[,id=secret...]`.
///
/// Ids are trimmed and blank entries are skipped. Secrets are taken as
/// written: a secret with leading or trailing whitespace is rejected rather
/// than silently altered. Missing `=`, blank ids or secrets, and duplicate ids
/// also fail.
pub fn parse_key_specs(specs: &str) -> Result<Vec<(String, Vec<u8>)>> {
    let mut keys: Vec<(String, Vec<u8>)> = Vec::new();

    for entry in specs.split(',').filter(|e| !e.trim().is_empty()) {
        let (id, secret) = entry
            .split_once('=')
            .ok_or_else(|| KeyringError::InvalidKeySpec("expected id=secret".into()))?;
        let id = id.trim();

        if id.is_empty() {
            return Err(KeyringError::InvalidKeySpec("blank key id".into()));
        }
        if secret.trim().is_empty() {
            return Err(KeyringError::InvalidKeySpec(format!(
                "blank secret for key id {id:?}"
            )));
        }
        check_secret_padding(id, secret)?;
        if keys.iter().any(|(existing, _)| existing == id) {
            return Err(KeyringError::InvalidKeySpec(format!(
                "duplicate key id {id:?}"
            )));
        }
        keys.push((id.to_string(), secret.as_bytes().to_vec()));
    }

    Ok(keys)
}

fn check_secret_padding(id: &str, secret: &str) -> Result<()> {
    if secret.trim() != secret {
        return Err(KeyringError::InvalidKeySpec(format!(
            "secret for key id {id:?} has surrounding whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_specs() {
        let keys = parse_key_specs(" v1=alpha, v2=beta,,").unwrap();
        assert_eq!(
            keys,
            vec![
                ("v1".to_string(), b"alpha".to_vec()),
                ("v2".to_string(), b"beta".to_vec())
            ]
        );
    }

    #[test]
    fn test_padded_secrets_are_rejected() {
        for specs in ["v1= alpha", "v1=alpha ", "v1=alpha ,v2=beta"] {
            assert!(
                matches!(parse_key_specs(specs), Err(KeyringError::InvalidKeySpec(_))),
                "{specs:?}"
            );
        }
        assert!(matches!(
            KeyringConfig::single("secret\n").build(),
            Err(KeyringError::InvalidKeySpec(_))
        ));
    }

    #[test]
    fn test_secret_may_contain_equals() {
        let keys = parse_key_specs("v1=a=b").unwrap();
        assert_eq!(keys[0].1, b"a=b".to_vec());
    }

    #[test]
    fn test_parse_specs_rejects_malformed() {
        assert!(matches!(
            parse_key_specs("v1"),
            Err(KeyringError::InvalidKeySpec(_))
        ));
        assert!(matches!(
            parse_key_specs("=secret"),
            Err(KeyringError::InvalidKeySpec(_))
        ));
        assert!(matches!(
            parse_key_specs("v1="),
            Err(KeyringError::InvalidKeySpec(_))
        ));
        assert!(matches!(
            parse_key_specs("v1=a,v1=b"),
            Err(KeyringError::InvalidKeySpec(_))
        ));
    }

    #[test]
    fn test_single_key_uses_default_id() {
        let ring = KeyringConfig::single("secret").build().unwrap();
        assert_eq!(ring.active_key_id(), DEFAULT_KEY_ID);
    }

    #[test]
    fn test_rotating_config() {
        let ring = KeyringConfig::rotating("v1=old,v2=new", "v2").build().unwrap();
        assert_eq!(ring.active_key_id(), "v2");
        assert_eq!(ring.key_ids().collect::<Vec<_>>(), vec!["v1", "v2"]);
    }

    #[test]
    fn test_single_key_joins_rotation_list() {
        let config = KeyringConfig {
            hmac_key: Some("newest".into()),
            hmac_keys: Some("v1=old".into()),
            active_key_id: Some("v2".into()),
        };
        let ring = config.build().unwrap();
        assert!(ring.contains("v1"));
        assert_eq!(ring.active_key_id(), "v2");
    }

    #[test]
    fn test_single_key_conflicting_with_list() {
        let config = KeyringConfig {
            hmac_key: Some("other".into()),
            hmac_keys: Some("v1=old".into()),
            active_key_id: None,
        };
        assert!(matches!(
            config.build(),
            Err(KeyringError::InvalidKeySpec(_))
        ));
    }

    #[test]
    fn test_empty_config_has_no_keys() {
        assert_eq!(
            KeyringConfig::default().build().unwrap_err(),
            KeyringError::NoKeys
        );
    }

    #[test]
    fn test_active_key_missing_from_list() {
        let err = KeyringConfig::rotating("v1=old", "v2").build().unwrap_err();
        assert_eq!(err, KeyringError::ActiveKeyNotFound("v2".into()));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = KeyringConfig {
            hmac_key: Some("topsecret".into()),
            hmac_keys: Some("v0=ancient".into()),
            active_key_id: None,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("ancient"));
        assert!(debug.contains("v0"));
    }
}
