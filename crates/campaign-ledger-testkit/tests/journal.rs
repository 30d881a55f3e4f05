//! Arbitrary command streams always leave a verifiable journal.

use proptest::prelude::*;

use campaign_ledger::store::{ListEventsRequest, Store};
use campaign_ledger::{CampaignState, EventOrder};
use campaign_ledger_testkit::generators::{command_type, payload_json};
use campaign_ledger_testkit::TestFixture;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_command_streams_keep_journal_valid(
        steps in prop::collection::vec((command_type(), payload_json()), 0..12),
    ) {
        let rt = runtime();
        let fixture = TestFixture::with_seed([3; 32]);

        let (committed, head, state, replayed) = rt.block_on(async {
            let (id, _) = fixture.create_campaign("Sunfall").await.unwrap();
            let mut committed = 1u64;
            for (command_type, payload) in &steps {
                let outcome = fixture
                    .ledger
                    .execute(&fixture.command(&id, command_type, payload))
                    .await
                    .unwrap();
                committed += outcome.events().len() as u64;
            }

            let report = fixture.ledger.verify_campaign(&id).await.unwrap();
            let head = fixture.ledger.store().head(&id).await.unwrap();
            assert_eq!(report.head, head);

            let state = fixture.ledger.campaign_state(&id).await.unwrap();
            let all = fixture
                .ledger
                .list_events(ListEventsRequest::new(id.clone()).page_size(200))
                .await
                .unwrap();
            let replayed = CampaignState::replay(all.events.iter().map(|e| &e.event));
            (committed, head.seq, state, replayed)
        });

        prop_assert_eq!(committed, head);
        prop_assert_eq!(state, replayed);
        prop_assert!(state.created);
    }

    #[test]
    fn test_descending_pages_cover_journal(page_size in 1usize..5, updates in 0usize..9) {
        let rt = runtime();
        let fixture = TestFixture::with_seed([4; 32]);

        let seen = rt.block_on(async {
            let (id, _) = fixture.create_campaign("Sunfall").await.unwrap();
            for n in 0..updates {
                let payload = format!(r#"{{"fields":{{"theme_prompt":"act {n}"}}}}"#);
                fixture
                    .ledger
                    .execute(&fixture.command(&id, "campaign.update", &payload))
                    .await
                    .unwrap();
            }

            let request = ListEventsRequest::new(id)
                .page_size(page_size)
                .order(EventOrder::Descending);
            let mut seen = Vec::new();
            let mut page = fixture.ledger.list_events(request.clone()).await.unwrap();
            loop {
                seen.extend(page.events.iter().map(|e| e.seq));
                match page.next_page_token.take() {
                    Some(token) => {
                        page = fixture
                            .ledger
                            .list_events(request.clone().page_token(token))
                            .await
                            .unwrap();
                    }
                    None => break,
                }
            }
            seen
        });

        let expected: Vec<u64> = (1..=(updates as u64 + 1)).rev().collect();
        prop_assert_eq!(seen, expected);
    }
}
