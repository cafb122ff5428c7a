//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::MessageSender;
use super::transition::TransitionError;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Idle), Just(ChatState::AwaitingResponse)]
}

fn arb_text() -> impl Strategy<Value = String> {
    // Mix of realistic chat text, keyword-laden input, and junk
    prop_oneof![
        "[a-zA-Z0-9 ?!.,]{1,60}",
        Just("hello, can you show me some code?".to_string()),
        Just("xyzzy".to_string()),
        "\\PC{0,40}",
    ]
}

fn arb_blank() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..10)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

fn arb_completion() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{1,40}".prop_map(|reply| Event::ResponderSuccess { reply }),
        "[a-zA-Z ]{1,40}".prop_map(|message| Event::ResponderFailure { message }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// An accepted submission invokes the responder exactly once, with
    /// the trimmed text, and appends exactly one user message.
    #[test]
    fn accepted_submission_invokes_responder_once(text in arb_text()) {
        prop_assume!(!text.trim().is_empty());

        let result = transition(ChatState::Idle, Event::UserMessage { text: text.clone() }).unwrap();

        prop_assert_eq!(result.new_state, ChatState::AwaitingResponse);

        let appends: Vec<_> = result.effects.iter().filter_map(|e| match e {
            Effect::AppendMessage { sender: MessageSender::User, text } => Some(text.clone()),
            _ => None,
        }).collect();
        let invocations: Vec<_> = result.effects.iter().filter_map(|e| match e {
            Effect::InvokeResponder { input } => Some(input.clone()),
            _ => None,
        }).collect();

        prop_assert_eq!(appends, vec![text.trim().to_string()]);
        prop_assert_eq!(invocations, vec![text.trim().to_string()]);
    }

    /// Submission never appends a bot message or an error annotation.
    #[test]
    fn submission_never_produces_bot_output(text in arb_text()) {
        if let Ok(result) = transition(ChatState::Idle, Event::UserMessage { text }) {
            for effect in &result.effects {
                let is_bot_or_error = matches!(
                    effect,
                    Effect::AppendMessage { sender: MessageSender::Bot, .. } | Effect::SetError { .. }
                );
                prop_assert!(!is_bot_or_error);
            }
        }
    }

    /// Submission while a response is pending is always rejected.
    #[test]
    fn pending_always_rejects_submission(text in arb_text()) {
        let result = transition(ChatState::AwaitingResponse, Event::UserMessage { text });
        prop_assert!(matches!(result, Err(TransitionError::ResponderBusy)));
    }

    /// Whitespace-only input is always rejected, whatever the state.
    #[test]
    fn blank_input_always_rejected(state in arb_state(), text in arb_blank()) {
        let result = transition(state, Event::UserMessage { text });
        prop_assert!(result.is_err());
    }

    /// Every completion event received while pending returns to Idle.
    #[test]
    fn completion_always_returns_to_idle(event in arb_completion()) {
        let result = transition(ChatState::AwaitingResponse, event).unwrap();
        prop_assert_eq!(result.new_state, ChatState::Idle);
    }

    /// Completion events in Idle are invalid: there is nothing they
    /// could be completing.
    #[test]
    fn completion_in_idle_is_invalid(event in arb_completion()) {
        let result = transition(ChatState::Idle, event);
        prop_assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }

    /// A failure surfaces only the fixed notice, never the raw error.
    #[test]
    fn failure_never_leaks_raw_error(message in "[a-zA-Z0-9 :/.]{1,60}") {
        prop_assume!(message != FAILURE_NOTICE);

        let result = transition(
            ChatState::AwaitingResponse,
            Event::ResponderFailure { message },
        ).unwrap();

        for effect in &result.effects {
            if let Effect::SetError { message } = effect {
                prop_assert_eq!(message.as_str(), FAILURE_NOTICE);
            }
        }
    }
}
