//! The decision engine entry point.

use crate::campaign::{self, Lifecycle};
use crate::clock::Clock;
use crate::command::{Command, CommandKind};
use crate::decision::Decision;
use crate::rejection::{codes, Rejection};
use crate::state::CampaignState;

/// Decide what a command does to a campaign.
///
/// Checks run in order and the first failure wins:
///
/// 1. The command type must be known.
/// 2. The campaign id must not be blank.
/// 3. The payload must decode.
/// 4. Command-specific validation against `state`.
///
/// On success the decision holds exactly one event stamped with
/// `clock.now()`. This function performs no I/O and mutates nothing.
pub fn decide(state: &CampaignState, command: &Command, clock: &dyn Clock) -> Decision {
    let Some(kind) = CommandKind::parse(&command.command_type) else {
        return Decision::reject(Rejection::new(
            codes::COMMAND_TYPE_UNSUPPORTED,
            format!("unsupported command type {:?}", command.command_type),
        ));
    };

    if command.campaign_id.is_blank() {
        return Decision::reject(Rejection::new(
            codes::CAMPAIGN_ID_REQUIRED,
            "campaign id is required",
        ));
    }

    let now = clock.now();
    let result = match kind {
        CommandKind::Create => campaign::decide_create(state, command, now),
        CommandKind::Update => campaign::decide_update(state, command, now),
        CommandKind::Fork => campaign::decide_fork(state, command, now),
        CommandKind::Activate => {
            campaign::decide_lifecycle(Lifecycle::Activate, state, command, now)
        }
        CommandKind::End => campaign::decide_lifecycle(Lifecycle::End, state, command, now),
        CommandKind::Archive => {
            campaign::decide_lifecycle(Lifecycle::Archive, state, command, now)
        }
        CommandKind::Restore => {
            campaign::decide_lifecycle(Lifecycle::Restore, state, command, now)
        }
    };

    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_cover_asset, is_cover_asset};
    use crate::clock::FixedClock;
    use crate::command::types;
    use crate::events;
    use crate::state::CampaignStatus;
    use campaign_ledger_core::{ActorType, CampaignId, Event};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap())
    }

    fn command(command_type: &str, payload: &str) -> Command {
        Command::new(
            CampaignId::new("camp-1"),
            command_type,
            ActorType::Participant,
            "user-1",
            payload,
        )
    }

    fn accepted(decision: Decision) -> Event {
        assert!(decision.is_accepted(), "rejected: {:?}", decision.rejections);
        assert_eq!(decision.events.len(), 1);
        decision.events.into_iter().next().unwrap()
    }

    fn rejected_code(decision: Decision) -> String {
        assert!(decision.events.is_empty());
        assert_eq!(decision.rejections.len(), 1);
        decision.rejections[0].code.clone()
    }

    const CREATE: &str =
        r#"{"name":"Sunfall","game_system":"GAME_SYSTEM_DAGGERHEART","gm_mode":"GM_MODE_HUMAN"}"#;

    #[test]
    fn test_create_campaign() {
        let event = accepted(decide(
            &CampaignState::default(),
            &command(types::CAMPAIGN_CREATE, CREATE),
            &clock(),
        ));

        assert_eq!(event.event_type, events::CAMPAIGN_CREATED);
        assert_eq!(event.timestamp, clock().0);
        assert_eq!(event.entity_type.as_deref(), Some("campaign"));
        assert_eq!(event.entity_id.as_deref(), Some("camp-1"));
        assert_eq!(event.payload["name"], "Sunfall");
        assert_eq!(event.payload["game_system"], "daggerheart");
        assert_eq!(event.payload["gm_mode"], "human");
        assert_eq!(event.payload["status"], "draft");
        assert_eq!(event.payload["intent"], "standard");
        assert_eq!(event.payload["access_policy"], "private");
        assert_eq!(event.payload["locale"], "en-US");
        assert_eq!(event.payload["cover_asset_id"], default_cover_asset("camp-1"));
        assert!(event.payload.get("theme_prompt").is_none());
    }

    #[test]
    fn test_create_is_deterministic() {
        let cmd = command(types::CAMPAIGN_CREATE, CREATE);
        let a = decide(&CampaignState::default(), &cmd, &clock());
        let b = decide(&CampaignState::default(), &cmd, &clock());
        assert_eq!(a, b);
    }

    #[test]
    fn test_create_normalizes_optional_fields() {
        let payload = json!({
            "name": "  Sunfall  ",
            "game_system": "daggerheart",
            "gm_mode": "hybrid",
            "intent": "CAMPAIGN_INTENT_SANDBOX",
            "access_policy": "public",
            "locale": " pt-BR ",
            "theme_prompt": "  ash and embers ",
            "cover_asset_id": "sunken_temple",
        })
        .to_string();
        let event = accepted(decide(
            &CampaignState::default(),
            &command(types::CAMPAIGN_CREATE, &payload),
            &clock(),
        ));
        assert_eq!(event.payload["name"], "Sunfall");
        assert_eq!(event.payload["gm_mode"], "hybrid");
        assert_eq!(event.payload["intent"], "sandbox");
        assert_eq!(event.payload["access_policy"], "public");
        assert_eq!(event.payload["locale"], "pt-BR");
        assert_eq!(event.payload["theme_prompt"], "ash and embers");
        assert_eq!(event.payload["cover_asset_id"], "sunken_temple");
    }

    #[test]
    fn test_create_validation_order() {
        let cases = [
            (json!({"name": " ", "game_system": "x", "gm_mode": "x"}), codes::CAMPAIGN_NAME_EMPTY),
            (
                json!({"name": "A", "game_system": "GAME_SYSTEM_UNSPECIFIED", "gm_mode": "x"}),
                codes::CAMPAIGN_GAME_SYSTEM_INVALID,
            ),
            (
                json!({"name": "A", "game_system": "daggerheart", "gm_mode": "robot"}),
                codes::CAMPAIGN_GM_MODE_INVALID,
            ),
            (
                json!({"name": "A", "game_system": "daggerheart", "gm_mode": "ai", "intent": "epic"}),
                codes::CAMPAIGN_INTENT_INVALID,
            ),
            (
                json!({"name": "A", "game_system": "daggerheart", "gm_mode": "ai", "access_policy": "open"}),
                codes::CAMPAIGN_ACCESS_POLICY_INVALID,
            ),
            (
                json!({"name": "A", "game_system": "daggerheart", "gm_mode": "ai", "cover_asset_id": "nope"}),
                codes::CAMPAIGN_COVER_ASSET_INVALID,
            ),
        ];
        for (payload, code) in cases {
            let decision = decide(
                &CampaignState::default(),
                &command(types::CAMPAIGN_CREATE, &payload.to_string()),
                &clock(),
            );
            assert_eq!(rejected_code(decision), code, "payload {payload}");
        }
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let decision = decide(
            &CampaignState::with_status(CampaignStatus::Draft),
            &command(types::CAMPAIGN_CREATE, CREATE),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_ALREADY_EXISTS);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let decision = decide(
            &CampaignState::default(),
            &command(types::CAMPAIGN_CREATE, "{corrupt"),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::PAYLOAD_DECODE_FAILED);
    }

    #[test]
    fn test_unknown_command_type() {
        let decision = decide(
            &CampaignState::default(),
            &command("campaign.delete", "{}"),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::COMMAND_TYPE_UNSUPPORTED);
    }

    #[test]
    fn test_blank_campaign_id() {
        let mut cmd = command(types::CAMPAIGN_CREATE, "{corrupt");
        cmd.campaign_id = CampaignId::new("  ");
        let decision = decide(&CampaignState::default(), &cmd, &clock());
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_ID_REQUIRED);
    }

    #[test]
    fn test_end_from_draft_rejected() {
        let decision = decide(
            &CampaignState::with_status(CampaignStatus::Draft),
            &command(types::CAMPAIGN_END, ""),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_STATUS_TRANSITION);
    }

    #[test]
    fn test_lifecycle_commands() {
        let cases = [
            (types::CAMPAIGN_ACTIVATE, CampaignStatus::Draft, "active"),
            (types::CAMPAIGN_END, CampaignStatus::Active, "completed"),
            (types::CAMPAIGN_ARCHIVE, CampaignStatus::Active, "archived"),
            (types::CAMPAIGN_ARCHIVE, CampaignStatus::Draft, "archived"),
            (types::CAMPAIGN_RESTORE, CampaignStatus::Archived, "draft"),
        ];
        for (command_type, from, to) in cases {
            let event = accepted(decide(
                &CampaignState::with_status(from),
                &command(command_type, "{}"),
                &clock(),
            ));
            assert_eq!(event.event_type, events::CAMPAIGN_UPDATED);
            assert_eq!(event.payload, json!({"fields": {"status": to}}));
        }
    }

    #[test]
    fn test_lifecycle_requires_created() {
        let decision = decide(
            &CampaignState::default(),
            &command(types::CAMPAIGN_ARCHIVE, ""),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_NOT_CREATED);
    }

    #[test]
    fn test_lifecycle_rejects_corrupt_payload() {
        let decision = decide(
            &CampaignState::with_status(CampaignStatus::Active),
            &command(types::CAMPAIGN_END, "{corrupt"),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::PAYLOAD_DECODE_FAILED);
    }

    #[test]
    fn test_restore_from_completed_rejected() {
        let decision = decide(
            &CampaignState::with_status(CampaignStatus::Completed),
            &command(types::CAMPAIGN_RESTORE, ""),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_STATUS_TRANSITION);
    }

    #[test]
    fn test_update_normalizes_fields() {
        let payload = json!({"fields": {
            "name": " Sunrise ",
            "status": "CAMPAIGN_STATUS_ACTIVE",
            "cover_asset_id": "frozen_pass",
        }})
        .to_string();
        let event = accepted(decide(
            &CampaignState::with_status(CampaignStatus::Draft),
            &command(types::CAMPAIGN_UPDATE, &payload),
            &clock(),
        ));
        assert_eq!(
            event.payload,
            json!({"fields": {"cover_asset_id": "frozen_pass", "name": "Sunrise", "status": "active"}})
        );
    }

    #[test]
    fn test_update_rejections() {
        let draft = CampaignState::with_status(CampaignStatus::Draft);
        let cases = [
            (CampaignState::default(), json!({"fields": {"name": "x"}}), codes::CAMPAIGN_NOT_CREATED),
            (draft, json!({"fields": {}}), codes::CAMPAIGN_UPDATE_EMPTY),
            (draft, json!({}), codes::CAMPAIGN_UPDATE_EMPTY),
            (draft, json!({"fields": {"gm_mode": "ai"}}), codes::CAMPAIGN_UPDATE_FIELD_INVALID),
            (draft, json!({"fields": {"name": "  "}}), codes::CAMPAIGN_NAME_EMPTY),
            (draft, json!({"fields": {"status": "paused"}}), codes::CAMPAIGN_INVALID_STATUS),
            (
                draft,
                json!({"fields": {"status": "completed"}}),
                codes::CAMPAIGN_INVALID_STATUS_TRANSITION,
            ),
            (draft, json!({"fields": {"cover_asset_id": "x"}}), codes::CAMPAIGN_COVER_ASSET_INVALID),
            (draft, json!({"fields": {"locale": ""}}), codes::CAMPAIGN_LOCALE_INVALID),
            (draft, json!({"fields": {"name": 7}}), codes::PAYLOAD_DECODE_FAILED),
        ];
        for (state, payload, code) in cases {
            let decision = decide(
                &state,
                &command(types::CAMPAIGN_UPDATE, &payload.to_string()),
                &clock(),
            );
            assert_eq!(rejected_code(decision), code, "payload {payload}");
        }
    }

    #[test]
    fn test_update_first_violation_in_field_order() {
        // "cover_asset_id" sorts before "name".
        let payload = json!({"fields": {"name": " ", "cover_asset_id": "nope"}}).to_string();
        let decision = decide(
            &CampaignState::with_status(CampaignStatus::Active),
            &command(types::CAMPAIGN_UPDATE, &payload),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_COVER_ASSET_INVALID);
    }

    #[test]
    fn test_fork_passes_payload_through() {
        let payload = json!({
            "parent_campaign_id": "camp-0",
            "fork_event_seq": 42,
            "origin_campaign_id": "camp-root",
            "copy_participants": true,
        });
        let event = accepted(decide(
            &CampaignState::with_status(CampaignStatus::Draft),
            &command(types::CAMPAIGN_FORK, &payload.to_string()),
            &clock(),
        ));
        assert_eq!(event.event_type, events::CAMPAIGN_FORKED);
        assert_eq!(event.payload, payload);
        assert_eq!(event.entity_id.as_deref(), Some("camp-1"));
    }

    const FORK: &str = r#"{"parent_campaign_id":"camp-0","fork_event_seq":3,"origin_campaign_id":"camp-0","copy_participants":false}"#;

    #[test]
    fn test_fork_requires_created() {
        let decision = decide(
            &CampaignState::default(),
            &command(types::CAMPAIGN_FORK, FORK),
            &clock(),
        );
        assert_eq!(rejected_code(decision), codes::CAMPAIGN_NOT_CREATED);
    }

    #[test]
    fn test_fork_rejects_partial_or_extra_fields() {
        for payload in [
            r#"{"parent_campaign_id":"p","extra":1}"#,
            r#"{"parent_campaign_id":"p"}"#,
            r#"{"parent_campaign_id":"camp-0","fork_event_seq":3,"origin_campaign_id":"camp-0","copy_participants":false,"extra":1}"#,
        ] {
            let decision = decide(
                &CampaignState::with_status(CampaignStatus::Draft),
                &command(types::CAMPAIGN_FORK, payload),
                &clock(),
            );
            assert_eq!(rejected_code(decision), codes::PAYLOAD_DECODE_FAILED, "{payload}");
        }
    }

    #[test]
    fn test_entity_overrides_command_entity() {
        let cmd = command(types::CAMPAIGN_CREATE, CREATE)
            .with_entity("participant", "p-1")
            .with_session_id("sess-1");
        let event = accepted(decide(&CampaignState::default(), &cmd, &clock()));
        assert_eq!(event.entity_type.as_deref(), Some("campaign"));
        assert_eq!(event.entity_id.as_deref(), Some("camp-1"));
        assert_eq!(event.session_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn test_full_lifecycle_replay() {
        let steps = [
            (types::CAMPAIGN_CREATE, CREATE),
            (types::CAMPAIGN_ACTIVATE, ""),
            (types::CAMPAIGN_ARCHIVE, ""),
            (types::CAMPAIGN_RESTORE, ""),
        ];
        let mut state = CampaignState::default();
        for (command_type, payload) in steps {
            let event = accepted(decide(&state, &command(command_type, payload), &clock()));
            state.apply(&event);
        }
        assert_eq!(state, CampaignState::with_status(CampaignStatus::Draft));
        assert!(is_cover_asset(default_cover_asset("camp-1")));
    }
}
