//! Root keys, per-campaign key derivation, and chain-hash signatures.
//!
//! Root keys never sign anything directly. Each signature uses a key derived
//! from the root key with HKDF-SHA256 (no salt, info `campaign:<id>`), so a
//! leaked derived key only exposes one campaign.

use std::collections::BTreeMap;
use std::fmt;

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{KeyringError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Length of a derived campaign key in bytes.
pub const DERIVED_KEY_LEN: usize = 32;

/// HKDF info prefix for campaign-scoped keys.
pub const CAMPAIGN_KEY_INFO_PREFIX: &str = "campaign:";

/// Secret bytes of a root key.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct RootKey(Vec<u8>);

impl RootKey {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Generate a random 32-byte root key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RootKey({} bytes)", self.0.len())
    }
}

/// A campaign-scoped HMAC key.
#[derive(Clone)]
pub struct DerivedKey([u8; DERIVED_KEY_LEN]);

impl DerivedKey {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.0
    }

    /// HMAC-SHA256 over `message`, hex encoded.
    fn mac_hex(&self, message: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| KeyringError::KeyDerivation(e.to_string()))?;
        mac.update(message);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive the signing key for one campaign from a root key.
pub fn derive_campaign_key(root: &RootKey, campaign_id: &str) -> Result<DerivedKey> {
    if campaign_id.trim().is_empty() {
        return Err(KeyringError::EmptyCampaignId);
    }

    let hk = Hkdf::<Sha256>::new(None, root.as_bytes());
    let info = format!("{CAMPAIGN_KEY_INFO_PREFIX}{campaign_id}");
    let mut okm = [0u8; DERIVED_KEY_LEN];
    hk.expand(info.as_bytes(), &mut okm)
        .map_err(|e| KeyringError::KeyDerivation(e.to_string()))?;
    Ok(DerivedKey(okm))
}

/// A chain-hash signature and the root key id that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSignature {
    /// Hex HMAC-SHA256.
    pub signature: String,
    /// Id of the root key the signing key was derived from.
    pub key_id: String,
}

/// A set of root HMAC keys with exactly one active key.
///
/// Immutable after construction. Rotating keys means building a new keyring
/// that still contains the retired keys, so historical events stay verifiable.
#[derive(Clone)]
pub struct Keyring {
    keys: BTreeMap<String, RootKey>,
    active_key_id: String,
}

impl Keyring {
    /// Build a keyring from `(key_id, secret)` pairs.
    ///
    /// Fails if no keys are given, if the active id is blank or unknown, or if
    /// any key has a blank id, a duplicate id or an empty secret.
    pub fn new<I, K, V>(keys: I, active_key_id: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let mut map = BTreeMap::new();
        for (id, secret) in keys {
            let id: String = id.into();
            let id = id.trim().to_string();
            if id.is_empty() {
                return Err(KeyringError::EmptyKeyId);
            }
            let secret = RootKey::from_bytes(secret);
            if secret.is_empty() {
                return Err(KeyringError::EmptyKeyMaterial(id));
            }
            if map.contains_key(&id) {
                return Err(KeyringError::DuplicateKeyId(id));
            }
            map.insert(id, secret);
        }

        if map.is_empty() {
            return Err(KeyringError::NoKeys);
        }

        let active_key_id = active_key_id.trim();
        if active_key_id.is_empty() {
            return Err(KeyringError::MissingActiveKey);
        }
        if !map.contains_key(active_key_id) {
            return Err(KeyringError::ActiveKeyNotFound(active_key_id.to_string()));
        }

        Ok(Self {
            keys: map,
            active_key_id: active_key_id.to_string(),
        })
    }

    /// The id of the key used for new signatures.
    pub fn active_key_id(&self) -> &str {
        &self.active_key_id
    }

    /// All configured key ids, sorted.
    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// True if `key_id` is configured.
    pub fn contains(&self, key_id: &str) -> bool {
        self.keys.contains_key(key_id)
    }

    /// Sign a chain hash with the active key.
    pub fn sign_chain_hash(&self, campaign_id: &str, chain_hash: &str) -> Result<ChainSignature> {
        if chain_hash.is_empty() {
            return Err(KeyringError::EmptyChainHash);
        }
        let root = self
            .keys
            .get(&self.active_key_id)
            .ok_or_else(|| KeyringError::ActiveKeyNotFound(self.active_key_id.clone()))?;
        let derived = derive_campaign_key(root, campaign_id)?;

        Ok(ChainSignature {
            signature: derived.mac_hex(chain_hash.as_bytes())?,
            key_id: self.active_key_id.clone(),
        })
    }

    /// Verify a chain-hash signature against the specific `key_id` given.
    ///
    /// The key need not be the active one. Comparison is constant time.
    pub fn verify_chain_hash(
        &self,
        campaign_id: &str,
        chain_hash: &str,
        signature: &str,
        key_id: &str,
    ) -> Result<()> {
        if campaign_id.trim().is_empty() {
            return Err(KeyringError::EmptyCampaignId);
        }
        if key_id.trim().is_empty() {
            return Err(KeyringError::EmptyKeyId);
        }
        if chain_hash.is_empty() {
            return Err(KeyringError::EmptyChainHash);
        }
        let root = self
            .keys
            .get(key_id)
            .ok_or_else(|| KeyringError::UnknownKeyId(key_id.to_string()))?;

        let derived = derive_campaign_key(root, campaign_id)?;
        let expected = derived.mac_hex(chain_hash.as_bytes())?;

        if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            Ok(())
        } else {
            tracing::warn!(
                campaign_id,
                key_id,
                "chain hash signature mismatch"
            );
            Err(KeyringError::SignatureMismatch)
        }
    }
}

impl fmt::Debug for Keyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyring")
            .field("key_ids", &self.keys.keys().collect::<Vec<_>>())
            .field("active_key_id", &self.active_key_id)
            .finish()
    }
}

/// Sign with an optional keyring, failing if none is configured.
pub fn sign_with(
    keyring: Option<&Keyring>,
    campaign_id: &str,
    chain_hash: &str,
) -> Result<ChainSignature> {
    keyring
        .ok_or(KeyringError::Unconfigured)?
        .sign_chain_hash(campaign_id, chain_hash)
}
