//! Sealing: turning a hashed event into a committed one.
//!
//! Store implementations call [`seal_event`] while holding their per-campaign
//! write lock (or inside their write transaction), with the head they just
//! read. Sealing is pure; persisting the result is the caller's job.

use campaign_ledger_core::{CommittedEvent, HashedEvent};
use campaign_ledger_keyring::{sign_with, Keyring};

use crate::error::Result;
use crate::traits::JournalHead;

/// Link `hashed` onto `head` and sign the resulting chain hash.
///
/// The committed event gets `seq = head.seq + 1` and
/// `prev_event_hash = head.chain_hash`. Fails if `keyring` is `None` or
/// signing fails; nothing is produced in that case.
pub fn seal_event(
    hashed: HashedEvent,
    head: &JournalHead,
    keyring: Option<&Keyring>,
) -> Result<CommittedEvent> {
    let chain_hash = hashed.chain_hash(&head.chain_hash)?;
    let signature = sign_with(keyring, hashed.event.campaign_id.as_str(), &chain_hash)?;

    Ok(CommittedEvent {
        event: hashed.event,
        seq: head.seq + 1,
        event_hash: hashed.event_hash,
        prev_event_hash: head.chain_hash.clone(),
        chain_hash,
        signature_key_id: signature.key_id,
        signature: signature.signature,
    })
}
