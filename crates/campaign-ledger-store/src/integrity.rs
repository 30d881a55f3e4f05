//! Journal verification.
//!
//! Recomputes every hash from the stored envelopes and checks signatures.
//! Event hashes come from `campaign_ledger_core::event_hash`, the same
//! function the append path uses.

use campaign_ledger_core::{chain_hash, event_hash, CampaignId, CommittedEvent};
use campaign_ledger_keyring::Keyring;
use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;
use crate::traits::JournalHead;

/// Summary of a successfully verified journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalReport {
    pub campaign_id: CampaignId,
    pub events_verified: u64,
    pub head: JournalHead,
}

/// Check one event's signature against the keyring.
pub fn verify_signature(event: &CommittedEvent, keyring: &Keyring) -> Result<(), IntegrityError> {
    keyring
        .verify_chain_hash(
            event.campaign_id().as_str(),
            &event.chain_hash,
            &event.signature,
            &event.signature_key_id,
        )
        .map_err(|source| IntegrityError::Signature {
            seq: event.seq,
            source,
        })
}

/// Verify one event given the chain hash of its predecessor.
pub fn verify_event(
    event: &CommittedEvent,
    prev_chain_hash: &str,
    keyring: &Keyring,
) -> Result<(), IntegrityError> {
    let computed = event_hash(&event.event).map_err(|e| IntegrityError::Unhashable {
        seq: event.seq,
        reason: e.to_string(),
    })?;
    if computed != event.event_hash {
        return Err(IntegrityError::EventHashMismatch {
            seq: event.seq,
            stored: event.event_hash.clone(),
            computed,
        });
    }

    if event.prev_event_hash != prev_chain_hash {
        return Err(IntegrityError::ChainBroken {
            seq: event.seq,
            expected: prev_chain_hash.to_string(),
            found: event.prev_event_hash.clone(),
        });
    }

    let computed = chain_hash(&event.event_hash, &event.prev_event_hash).map_err(|e| {
        IntegrityError::Unhashable {
            seq: event.seq,
            reason: e.to_string(),
        }
    })?;
    if computed != event.chain_hash {
        return Err(IntegrityError::ChainHashMismatch {
            seq: event.seq,
            stored: event.chain_hash.clone(),
            computed,
        });
    }

    verify_signature(event, keyring)
}

/// Verify a campaign's full journal, in ascending sequence order.
///
/// Sequence numbers must start at 1 and be gapless.
pub fn verify_journal(
    campaign_id: &CampaignId,
    events: &[CommittedEvent],
    keyring: &Keyring,
) -> Result<JournalReport, IntegrityError> {
    let mut head = JournalHead::genesis();

    for event in events {
        let expected = head.seq + 1;
        if event.seq != expected {
            return Err(IntegrityError::SequenceGap {
                expected,
                found: event.seq,
            });
        }
        if let Err(err) = verify_event(event, &head.chain_hash, keyring) {
            tracing::warn!(
                campaign_id = %campaign_id,
                seq = event.seq,
                error = %err,
                "journal verification failed"
            );
            return Err(err);
        }
        head = JournalHead::of(event);
    }

    Ok(JournalReport {
        campaign_id: campaign_id.clone(),
        events_verified: head.seq,
        head,
    })
}
