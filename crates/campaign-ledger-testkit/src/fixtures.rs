//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::RngCore;
use serde_json::{json, Value};

use campaign_ledger::{CommandOutcome, Ledger, LedgerConfig, Result};
use campaign_ledger_core::{ActorType, CampaignId, CommittedEvent, Event, HashedEvent};
use campaign_ledger_domain::command::types;
use campaign_ledger_domain::{Command, FixedClock, SequenceIdGenerator};
use campaign_ledger_keyring::{Keyring, KeyringConfig};
use campaign_ledger_store::{seal_event, JournalHead, MemoryStore, StoreError};

/// Key id fixtures sign under.
pub const FIXTURE_KEY_ID: &str = "v1";

/// A test fixture with a keyring, a fixed clock and an in-memory ledger.
pub struct TestFixture {
    pub secret: String,
    pub keyring: Keyring,
    pub clock: Arc<FixedClock>,
    pub ledger: Ledger<MemoryStore>,
}

impl TestFixture {
    /// Create a new test fixture with a random root secret.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::with_seed(seed)
    }

    /// Create with a deterministic root secret from seed.
    ///
    /// The clock is pinned to 2026-01-14T12:00:00Z and campaign ids come out
    /// as `camp-1`, `camp-2`, ...
    pub fn with_seed(seed: [u8; 32]) -> Self {
        let secret = hex::encode(seed);
        let at = Utc
            .with_ymd_and_hms(2026, 1, 14, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = Arc::new(FixedClock::new(at));
        let config = LedgerConfig {
            keyring: KeyringConfig {
                hmac_keys: Some(format!("{FIXTURE_KEY_ID}={secret}")),
                active_key_id: Some(FIXTURE_KEY_ID.to_string()),
                ..KeyringConfig::default()
            },
            ..LedgerConfig::default()
        };

        // Both builds see the same hex secret, so neither can fail.
        let keyring =
            Keyring::new([(FIXTURE_KEY_ID, secret.clone().into_bytes())], FIXTURE_KEY_ID)
                .unwrap_or_else(|e| panic!("fixture keyring: {e}"));
        let ledger = Ledger::in_memory(
            clock.clone(),
            Arc::new(SequenceIdGenerator::new("camp")),
            config,
        )
        .unwrap_or_else(|e| panic!("fixture ledger: {e}"));

        Self {
            secret,
            keyring,
            clock,
            ledger,
        }
    }

    /// The instant every decision is stamped with.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.0
    }

    /// Build a command issued by `gm-1`.
    pub fn command(&self, campaign_id: &CampaignId, command_type: &str, payload: &str) -> Command {
        Command::new(
            campaign_id.clone(),
            command_type,
            ActorType::Gm,
            "gm-1",
            payload,
        )
    }

    /// Create a Daggerheart campaign run by a human GM.
    pub async fn create_campaign(&self, name: &str) -> Result<(CampaignId, CommandOutcome)> {
        self.ledger
            .create_campaign(ActorType::Participant, "user-1", &create_payload(name))
            .await
    }

    /// Create a campaign and drive it to `active`.
    pub async fn active_campaign(&self, name: &str) -> Result<CampaignId> {
        let (id, _) = self.create_campaign(name).await?;
        self.ledger
            .execute(&self.command(&id, types::CAMPAIGN_ACTIVATE, ""))
            .await?;
        Ok(id)
    }

    /// Build an uncommitted event `offset_secs` after the fixture clock.
    pub fn make_event(
        &self,
        campaign_id: &CampaignId,
        event_type: &str,
        offset_secs: i64,
        payload: Value,
    ) -> Event {
        Event::builder(
            campaign_id.clone(),
            event_type,
            self.now() + Duration::seconds(offset_secs),
            ActorType::Gm,
            "gm-1",
        )
        .entity("campaign", campaign_id.as_str())
        .payload(payload)
        .build()
    }

    /// Seal `events` into a journal offline, signed with the fixture keyring.
    pub fn seal_journal(
        &self,
        events: Vec<Event>,
    ) -> std::result::Result<Vec<CommittedEvent>, StoreError> {
        let mut head = JournalHead::genesis();
        let mut journal = Vec::with_capacity(events.len());
        for event in events {
            let sealed = seal_event(HashedEvent::new(event)?, &head, Some(&self.keyring))?;
            head = JournalHead::of(&sealed);
            journal.push(sealed);
        }
        Ok(journal)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload for `campaign.create`.
pub fn create_payload(name: &str) -> String {
    json!({
        "name": name,
        "game_system": "GAME_SYSTEM_DAGGERHEART",
        "gm_mode": "GM_MODE_HUMAN",
    })
    .to_string()
}

/// Create fixtures whose keyrings hold distinct root secrets.
pub fn multi_key_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}
