//! The Ledger: command execution over a campaign journal.
//!
//! The Ledger brings together the decision engine, the keyring and a store.
//! Each command is decided against state replayed from the journal, and the
//! resulting events are appended with an optimistic head check.

use std::sync::Arc;

use campaign_ledger_core::{ActorType, CampaignId, CommittedEvent};
use campaign_ledger_domain::command::types;
use campaign_ledger_domain::{decide, CampaignState, Clock, Command, IdGenerator, Rejection};
use campaign_ledger_keyring::Keyring;
use campaign_ledger_store::{
    verify_journal, verify_signature, EventPage, ExpectedHead, JournalReport, ListEventsRequest,
    MemoryStore, Store, StoreExt,
};

use crate::config::LedgerConfig;
use crate::error::Result;

/// What happened to a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Events were appended.
    Committed(Vec<CommittedEvent>),
    /// The decision engine refused the command. Nothing was written.
    Rejected(Rejection),
}

impl CommandOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// Committed events, empty if rejected.
    pub fn events(&self) -> &[CommittedEvent] {
        match self {
            Self::Committed(events) => events,
            Self::Rejected(_) => &[],
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Committed(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Executing campaign commands
/// - Creating campaigns with generated ids
/// - Reading state and paginated journals
/// - Verifying journal integrity
pub struct Ledger<S: Store> {
    /// The storage backend.
    store: Arc<S>,
    /// Keyring for verifying stored signatures.
    keyring: Arc<Keyring>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    config: LedgerConfig,
}

impl Ledger<MemoryStore> {
    /// Ledger over a fresh in-memory store sharing the configured keyring.
    pub fn in_memory(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        config: LedgerConfig,
    ) -> Result<Self> {
        let keyring = Arc::new(config.keyring.build()?);
        let store = MemoryStore::with_keyring(Arc::clone(&keyring));
        Ok(Self {
            store: Arc::new(store),
            keyring,
            clock,
            ids,
            config,
        })
    }
}

impl<S: Store> Ledger<S> {
    /// Create a ledger over `store`.
    ///
    /// The keyring built from `config` is used for verification; the store
    /// signs with its own, which must hold the same root keys.
    pub fn new(
        store: S,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        config: LedgerConfig,
    ) -> Result<Self> {
        let keyring = Arc::new(config.keyring.build()?);
        Ok(Self {
            store: Arc::new(store),
            keyring,
            clock,
            ids,
            config,
        })
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Decide and append one command.
    ///
    /// Rejections are returned as [`CommandOutcome::Rejected`]. If another
    /// writer appended to the campaign in between, the append fails with a
    /// store conflict and nothing is retried.
    pub async fn execute(&self, command: &Command) -> Result<CommandOutcome> {
        let journal = self.store.read_journal(&command.campaign_id).await?;
        let head = journal.last().map(|e| e.seq).unwrap_or(0);
        let state = CampaignState::replay(journal.iter().map(|e| &e.event));

        let events = match decide(&state, command, self.clock.as_ref()).into_result() {
            Ok(events) => events,
            Err(rejection) => {
                tracing::debug!(
                    campaign_id = %command.campaign_id,
                    command_type = %command.command_type,
                    code = %rejection.code,
                    "command rejected"
                );
                return Ok(CommandOutcome::Rejected(rejection));
            }
        };

        let mut committed = Vec::with_capacity(events.len());
        let mut expected = head;
        for event in &events {
            let sealed = self
                .store
                .append_event(event, ExpectedHead::Seq(expected))
                .await?;
            expected = sealed.seq;
            committed.push(sealed);
        }

        tracing::info!(
            campaign_id = %command.campaign_id,
            command_type = %command.command_type,
            head = expected,
            "command committed"
        );
        Ok(CommandOutcome::Committed(committed))
    }

    /// Mint a campaign id and execute `campaign.create` for it.
    pub async fn create_campaign(
        &self,
        actor_type: ActorType,
        actor_id: &str,
        payload_json: &str,
    ) -> Result<(CampaignId, CommandOutcome)> {
        let campaign_id = self.ids.next_campaign_id();
        let command = Command::new(
            campaign_id.clone(),
            types::CAMPAIGN_CREATE,
            actor_type,
            actor_id,
            payload_json,
        );
        let outcome = self.execute(&command).await?;
        Ok((campaign_id, outcome))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Current state of a campaign, replayed from its journal.
    pub async fn campaign_state(&self, campaign_id: &CampaignId) -> Result<CampaignState> {
        let journal = self.store.read_journal(campaign_id).await?;
        Ok(CampaignState::replay(journal.iter().map(|e| &e.event)))
    }

    /// One page of a campaign's journal.
    ///
    /// Requests without a page size use the configured default. With
    /// `verify_on_read`, every returned signature is checked.
    pub async fn list_events(&self, request: ListEventsRequest) -> Result<EventPage> {
        let request = if request.page_size == 0 {
            request.page_size(self.config.default_page_size)
        } else {
            request
        };

        let page = self.store.list_events_page(&request).await?;
        if self.config.verify_on_read {
            for event in &page.events {
                verify_signature(event, &self.keyring)?;
            }
        }
        Ok(page)
    }

    /// Walk and verify a campaign's whole journal.
    pub async fn verify_campaign(&self, campaign_id: &CampaignId) -> Result<JournalReport> {
        let journal = self.store.read_journal(campaign_id).await?;
        let report = verify_journal(campaign_id, &journal, &self.keyring)?;
        tracing::debug!(
            campaign_id = %campaign_id,
            events = report.events_verified,
            "journal verified"
        );
        Ok(report)
    }
}
