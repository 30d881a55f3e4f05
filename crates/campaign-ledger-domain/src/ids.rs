//! Injected identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use campaign_ledger_core::CampaignId;
use uuid::Uuid;

/// Mints new campaign identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_campaign_id(&self) -> CampaignId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_campaign_id(&self) -> CampaignId {
        CampaignId::new(Uuid::new_v4().to_string())
    }
}

/// Predictable ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug)]
pub struct SequenceIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_campaign_id(&self) -> CampaignId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        CampaignId::new(format!("{}-{}", self.prefix, n))
    }
}
