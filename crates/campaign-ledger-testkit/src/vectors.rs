//! Golden test vectors for deterministic verification.
//!
//! The vectors form one three-event journal for campaign `camp-golden`,
//! signed with [`GOLDEN_ROOT_KEY`] under key id [`GOLDEN_KEY_ID`]. Any
//! implementation that hashes and signs events the same way must reproduce
//! every expected value byte for byte.

use chrono::{TimeZone, Utc};
use serde_json::Value;

use campaign_ledger_core::{chain_hash, event_hash, ActorType, CampaignId, Event, GENESIS_PREV_HASH};
use campaign_ledger_keyring::{Keyring, KeyringError};

/// Root secret the vectors are signed with.
pub const GOLDEN_ROOT_KEY: &[u8] = b"golden-root";
/// Key id the vectors are signed under.
pub const GOLDEN_KEY_ID: &str = "v1";
/// Campaign every vector belongs to.
pub const GOLDEN_CAMPAIGN_ID: &str = "camp-golden";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub event_type: &'static str,
    /// Milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    pub actor_type: ActorType,
    pub actor_id: &'static str,
    pub session_id: Option<&'static str>,
    /// Payload as JSON text.
    pub payload: &'static str,
    /// Canonical JSON of the hash envelope.
    pub expected_canonical: &'static str,
    pub expected_event_hash: &'static str,
    pub expected_chain_hash: &'static str,
    pub expected_signature: &'static str,
}

/// Get all golden test vectors, in journal order.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis campaign.created",
            event_type: "campaign.created",
            timestamp_millis: 1_768_392_000_000, // 2026-01-14T12:00:00Z
            actor_type: ActorType::Participant,
            actor_id: "user-1",
            session_id: None,
            payload: r#"{"name":"Sunfall","locale":"en-US","game_system":"daggerheart","gm_mode":"human","intent":"standard","access_policy":"private","cover_asset_id":"x","theme_prompt":""}"#,
            expected_canonical: r#"{"actor_id":"user-1","actor_type":"participant","campaign_id":"camp-golden","entity_id":"camp-golden","entity_type":"campaign","event_type":"campaign.created","payload":{"access_policy":"private","cover_asset_id":"x","game_system":"daggerheart","gm_mode":"human","intent":"standard","locale":"en-US","name":"Sunfall","theme_prompt":""},"timestamp":"2026-01-14T12:00:00Z"}"#,
            expected_event_hash: "cdf503794892570c82d458c60c3e1240",
            expected_chain_hash: "74c450e8763a638e1270f2261fe5ec95",
            expected_signature: "447407104e8afdd73a6ccb41624f831610ab9de37a914120dd85d3980d6504c2",
        },
        GoldenVector {
            name: "status update inside a session",
            event_type: "campaign.updated",
            timestamp_millis: 1_768_392_001_000,
            actor_type: ActorType::Gm,
            actor_id: "gm-1",
            session_id: Some("sess-1"),
            payload: r#"{"fields":{"status":"active"}}"#,
            expected_canonical: r#"{"actor_id":"gm-1","actor_type":"gm","campaign_id":"camp-golden","entity_id":"camp-golden","entity_type":"campaign","event_type":"campaign.updated","payload":{"fields":{"status":"active"}},"session_id":"sess-1","timestamp":"2026-01-14T12:00:01Z"}"#,
            expected_event_hash: "628683bf2fabfb222912cd5596831526",
            expected_chain_hash: "4f2dbe7f83c0cbad85cb7129cb3e7892",
            expected_signature: "1325b4c3da1d3402ba81a9acc8d39e3ba0aa46d43392a2ce29e561f8a3146969",
        },
        GoldenVector {
            name: "empty session id, sub-second time, unescaped markup",
            event_type: "campaign.updated",
            timestamp_millis: 1_768_392_002_500,
            actor_type: ActorType::System,
            actor_id: "",
            session_id: Some(""),
            payload: r#"{"fields":{"name":"<Sun & Fall>"}}"#,
            expected_canonical: r#"{"actor_id":"","actor_type":"system","campaign_id":"camp-golden","entity_id":"camp-golden","entity_type":"campaign","event_type":"campaign.updated","payload":{"fields":{"name":"<Sun & Fall>"}},"session_id":"","timestamp":"2026-01-14T12:00:02.500Z"}"#,
            expected_event_hash: "8ab778b730c4c95bb4b6d1cbbb3ade8d",
            expected_chain_hash: "ec62591d4436704f7ea97d95b8d46860",
            expected_signature: "6b23d05dae6b87a421fd38ca8b434f47df42ed5c3d49da8bbbc1805359bf7e21",
        },
    ]
}

/// Keyring holding the golden root key.
pub fn golden_keyring() -> Result<Keyring, KeyringError> {
    Keyring::new([(GOLDEN_KEY_ID, GOLDEN_ROOT_KEY.to_vec())], GOLDEN_KEY_ID)
}

/// Build the event a vector describes.
pub fn event_from_vector(vector: &GoldenVector) -> Result<Event, String> {
    let timestamp = Utc
        .timestamp_millis_opt(vector.timestamp_millis)
        .single()
        .ok_or_else(|| format!("{}: timestamp out of range", vector.name))?;
    let payload: Value = serde_json::from_str(vector.payload)
        .map_err(|e| format!("{}: payload is not JSON: {e}", vector.name))?;

    Ok(Event::builder(
        CampaignId::new(GOLDEN_CAMPAIGN_ID),
        vector.event_type,
        timestamp,
        vector.actor_type,
        vector.actor_id,
    )
    .session_id(vector.session_id.map(str::to_string))
    .entity("campaign", GOLDEN_CAMPAIGN_ID)
    .payload(payload)
    .build())
}

/// Recompute every vector as one chained journal.
///
/// Returns `(name, matches, detail)` per vector; `detail` names the first
/// value that differed.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let vectors = all_vectors();
    let keyring = match golden_keyring() {
        Ok(keyring) => keyring,
        Err(e) => {
            return vectors
                .iter()
                .map(|v| (v.name.to_string(), false, e.to_string()))
                .collect()
        }
    };
    let mut prev = GENESIS_PREV_HASH.to_string();

    vectors
        .iter()
        .map(|v| {
            let outcome = recompute(v, &keyring, &prev).and_then(|(event_hash, chain, sig)| {
                prev = chain.clone();
                if event_hash != v.expected_event_hash {
                    Err(format!("event hash {event_hash}"))
                } else if chain != v.expected_chain_hash {
                    Err(format!("chain hash {chain}"))
                } else if sig != v.expected_signature {
                    Err(format!("signature {sig}"))
                } else {
                    Ok(chain)
                }
            });
            match outcome {
                Ok(chain) => (v.name.to_string(), true, chain),
                Err(detail) => (v.name.to_string(), false, detail),
            }
        })
        .collect()
}

fn recompute(
    vector: &GoldenVector,
    keyring: &Keyring,
    prev: &str,
) -> Result<(String, String, String), String> {
    let event = event_from_vector(vector)?;
    let hash = event_hash(&event).map_err(|e| e.to_string())?;
    let chain = chain_hash(&hash, prev).map_err(|e| e.to_string())?;
    let signature = keyring
        .sign_chain_hash(GOLDEN_CAMPAIGN_ID, &chain)
        .map_err(|e| e.to_string())?;
    Ok((hash, chain, signature.signature))
}
