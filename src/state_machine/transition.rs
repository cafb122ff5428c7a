//! Pure state transition function
//!
//! Given the current machine state and an event, produce the next state
//! plus the effects the session runtime must execute. No I/O happens
//! here; the same inputs always produce the same outputs.

use super::{ChatState, Effect, Event};
use thiserror::Error;

/// Fixed user-facing text shown when a responder invocation fails.
/// The underlying error is logged, never displayed verbatim.
pub const FAILURE_NOTICE: &str = "Sorry, I encountered an error. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that reject an event without changing state
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("A response is already pending, wait for it to complete")]
    ResponderBusy,
    #[error("Message text must not be empty")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// A rejected event (`Err`) is a no-op on the session: the log and the
/// machine state are left exactly as they were.
pub fn transition(state: ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User Submission
        // ============================================================

        // Idle + UserMessage -> AwaitingResponse
        (ChatState::Idle, Event::UserMessage { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(TransitionResult::new(ChatState::AwaitingResponse)
                .with_effect(Effect::ClearError)
                .with_effect(Effect::append_user(trimmed))
                .with_effect(Effect::invoke_responder(trimmed)))
        }

        // Pending + UserMessage -> Reject. One outstanding responder
        // invocation at a time; concurrent submissions are rejected,
        // not queued.
        (ChatState::AwaitingResponse, Event::UserMessage { .. }) => {
            Err(TransitionError::ResponderBusy)
        }

        // ============================================================
        // Responder Completion
        // ============================================================

        (ChatState::AwaitingResponse, Event::ResponderSuccess { reply }) => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::append_bot(reply)))
        }

        (ChatState::AwaitingResponse, Event::ResponderFailure { .. }) => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::set_error(FAILURE_NOTICE)))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================

        // Completion events can only arrive while a request is outstanding
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}
