//! Console flow tests
//!
//! Exercises the prompt-submission rules end to end against the state struct:
//! one outstanding request at a time, the fixed relay-failure message when no
//! relay is configured, and transcript bookkeeping around submissions.

use sentinel_common::config::SentinelConfig;
use sentinel_common::intel::RELAY_FAILURE_MESSAGE;
use sentinelctl::tui::event_loop::TuiMessage;
use sentinelctl::tui::input::submit_prompt;
use sentinelctl::tui_state::{ChatItem, SentinelTuiState, GREETING};
use tokio::sync::mpsc;

/// State with the relay deliberately offline (key env var unset)
fn offline_state() -> SentinelTuiState {
    let mut config = SentinelConfig::default();
    config.intel.api_key_env = "SENTINEL_FLOW_TEST_KEY_THAT_IS_NEVER_SET".to_string();
    let state = SentinelTuiState::new(config);
    assert!(!state.intel_online());
    state
}

#[tokio::test]
async fn offline_submission_reports_the_fixed_relay_failure() {
    let mut state = offline_state();
    let (tx, mut rx) = mpsc::channel(8);

    state.input = "scan sector 0xFF".to_string();
    submit_prompt(&mut state, tx);

    assert!(state.waiting);
    assert!(state.input.is_empty());
    assert_eq!(
        state.conversation.last(),
        Some(&ChatItem::Operator("scan sector 0xFF".to_string()))
    );

    let TuiMessage::IntelReply(reply) = rx.recv().await.expect("reply expected");
    assert_eq!(reply, RELAY_FAILURE_MESSAGE);

    // The loop would now mark the request as settled
    state.waiting = false;
    state.add_core_reply(reply);
    assert_eq!(
        state.conversation.last(),
        Some(&ChatItem::Core(RELAY_FAILURE_MESSAGE.to_string()))
    );
}

#[tokio::test]
async fn resubmission_is_refused_while_waiting() {
    let mut state = offline_state();
    let (tx, mut rx) = mpsc::channel(8);

    state.input = "first".to_string();
    submit_prompt(&mut state, tx.clone());
    let transcript_len = state.conversation.len();

    // A second submission while the first is outstanding changes nothing
    state.input = "second".to_string();
    submit_prompt(&mut state, tx);

    assert_eq!(state.conversation.len(), transcript_len);
    assert_eq!(state.input, "second");

    // Exactly one reply arrives
    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn blank_input_is_not_submitted() {
    let mut state = offline_state();
    let (tx, mut rx) = mpsc::channel(8);

    state.input = "   ".to_string();
    submit_prompt(&mut state, tx);

    assert!(!state.waiting);
    assert_eq!(state.conversation, vec![ChatItem::Core(GREETING.to_string())]);
    assert!(rx.try_recv().is_err());
}
