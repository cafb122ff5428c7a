//! Per-session state owner and effect executor
//!
//! Applies the pure transition function under the session lock, then
//! executes the resulting effects: appending to the log, annotating
//! errors, spawning the responder, and broadcasting to subscribers.

use super::SessionEvent;
use crate::responder::Responder;
use crate::state_machine::{
    transition, ChatMessage, ChatState, Effect, Event, SessionContext, TransitionError,
};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Capacity of the per-session broadcast channel. Subscribers that lag
/// behind are skipped, not blocked on.
const BROADCAST_CAPACITY: usize = 64;

/// Mutable session data, guarded by one lock so each transition and
/// its effects are applied atomically
#[derive(Debug, Default)]
struct SessionLog {
    state: ChatState,
    messages: Vec<ChatMessage>,
    error: Option<String>,
    next_message_id: u64,
}

/// Read-only copy of a session's observable state
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub messages: Vec<ChatMessage>,
    pub pending: bool,
    pub error: Option<String>,
}

/// One conversation: immutable context, append-only log, the responder
/// handle, and the subscriber channel
pub struct ChatSession {
    context: SessionContext,
    log: Mutex<SessionLog>,
    responder: Arc<dyn Responder>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl ChatSession {
    pub fn new(session_id: String, responder: Arc<dyn Responder>) -> Self {
        let (events_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            context: SessionContext::new(session_id),
            log: Mutex::new(SessionLog::default()),
            responder,
            events_tx,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn id(&self) -> &str {
        &self.context.session_id
    }

    /// Subscribe to session events. Combine with `snapshot` to build an
    /// SSE stream: subscribe first, then snapshot, so no event falls
    /// between the two.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let log = self.lock_log();
        SessionSnapshot {
            messages: log.messages.clone(),
            pending: log.state.is_pending(),
            error: log.error.clone(),
        }
    }

    /// Submit user text.
    ///
    /// Rejected while a response is pending or when the trimmed text is
    /// empty; a rejection leaves the log untouched. On acceptance the
    /// user message is appended before this returns and the responder
    /// runs as a background task.
    pub fn submit(self: &Arc<Self>, text: &str) -> Result<(), TransitionError> {
        self.apply(Event::UserMessage {
            text: text.to_string(),
        })
    }

    /// Run one event through the state machine and execute its effects
    fn apply(self: &Arc<Self>, event: Event) -> Result<(), TransitionError> {
        let mut log = self.lock_log();
        let result = transition(log.state, event)?;

        let was_pending = log.state.is_pending();
        log.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(&mut log, effect);
        }

        if was_pending != log.state.is_pending() {
            let _ = self.events_tx.send(SessionEvent::StateChange {
                pending: log.state.is_pending(),
            });
        }
        Ok(())
    }

    fn execute_effect(self: &Arc<Self>, log: &mut SessionLog, effect: Effect) {
        match effect {
            Effect::AppendMessage { sender, text } => {
                let message = ChatMessage {
                    id: log.next_message_id,
                    sender,
                    text,
                    timestamp: Utc::now(),
                };
                log.next_message_id += 1;
                log.messages.push(message.clone());
                let _ = self.events_tx.send(SessionEvent::Message { message });
            }
            Effect::ClearError => {
                log.error = None;
            }
            Effect::SetError { message } => {
                log.error = Some(message.clone());
                let _ = self.events_tx.send(SessionEvent::Error { message });
            }
            Effect::InvokeResponder { input } => self.spawn_responder(input),
        }
    }

    /// Invoke the responder in the background; its outcome re-enters
    /// the state machine as a completion event.
    fn spawn_responder(self: &Arc<Self>, input: String) {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let event = match session.responder.respond(&input).await {
                Ok(reply) => Event::ResponderSuccess { reply },
                Err(e) => {
                    tracing::error!(
                        session_id = %session.id(),
                        error = %e,
                        "Responder invocation failed"
                    );
                    Event::ResponderFailure {
                        message: e.to_string(),
                    }
                }
            };

            // A completion the machine no longer expects is a bug, not
            // a user error
            if let Err(e) = session.apply(event) {
                tracing::error!(
                    session_id = %session.id(),
                    error = %e,
                    "Dropped responder completion"
                );
            }
        });
    }

    fn lock_log(&self) -> MutexGuard<'_, SessionLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{templates, ResponderError, SimulatedResponder};
    use crate::session::testing::MockResponder;
    use crate::state_machine::{MessageSender, FAILURE_NOTICE};
    use std::time::Duration;

    fn session_with(responder: Arc<dyn Responder>) -> Arc<ChatSession> {
        Arc::new(ChatSession::new("test-session".to_string(), responder))
    }

    /// Drain broadcast events until the predicate matches, with a cap
    /// so a broken session fails the test instead of hanging it.
    async fn wait_for(
        rx: &mut broadcast::Receiver<SessionEvent>,
        mut predicate: impl FnMut(&SessionEvent) -> bool,
    ) -> SessionEvent {
        for _ in 0..32 {
            let event = rx.recv().await.expect("event channel closed");
            if predicate(&event) {
                return event;
            }
        }
        panic!("expected event never arrived");
    }

    fn is_bot_message(event: &SessionEvent) -> bool {
        matches!(
            event,
            SessionEvent::Message {
                message: ChatMessage {
                    sender: MessageSender::Bot,
                    ..
                }
            }
        )
    }

    #[tokio::test]
    async fn test_submit_appends_user_message_and_sets_pending() {
        let mock = Arc::new(MockResponder::new());
        mock.queue_reply("canned");
        let session = session_with(mock);
        let mut rx = session.subscribe();

        session.submit("  Hello  ").unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].sender, MessageSender::User);
        assert_eq!(snapshot.messages[0].text, "Hello");
        assert!(snapshot.pending);

        wait_for(&mut rx, is_bot_message).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1].sender, MessageSender::Bot);
        assert_eq!(snapshot.messages[1].text, "canned");
        assert!(!snapshot.pending);
    }

    #[tokio::test]
    async fn test_blank_submission_is_a_no_op() {
        let session = session_with(Arc::new(MockResponder::new()));

        for text in ["", "   ", "\n\t"] {
            let result = session.submit(text);
            assert!(matches!(result, Err(TransitionError::EmptyMessage)));
        }

        let snapshot = session.snapshot();
        assert!(snapshot.messages.is_empty());
        assert!(!snapshot.pending);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_rejected_while_pending() {
        let session = session_with(Arc::new(SimulatedResponder::default()));
        let mut rx = session.subscribe();

        session.submit("hello").unwrap();
        let result = session.submit("are you there?");
        assert!(matches!(result, Err(TransitionError::ResponderBusy)));

        // Only the accepted submission reached the log
        assert_eq!(session.snapshot().messages.len(), 1);

        // After completion the session accepts input again
        wait_for(&mut rx, is_bot_message).await;
        session.submit("are you there?").unwrap();
    }

    #[tokio::test]
    async fn test_round_trips_alternate_with_increasing_ids() {
        let mock = Arc::new(MockResponder::new());
        let session = session_with(Arc::clone(&mock) as Arc<dyn Responder>);
        let mut rx = session.subscribe();

        for i in 0..3 {
            mock.queue_reply(format!("reply {i}"));
            session.submit(&format!("question {i}")).unwrap();
            wait_for(&mut rx, is_bot_message).await;
        }

        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 6);
        for (i, message) in snapshot.messages.iter().enumerate() {
            let expected = if i % 2 == 0 {
                MessageSender::User
            } else {
                MessageSender::Bot
            };
            assert_eq!(message.sender, expected);
        }
        for pair in snapshot.messages.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
        assert_eq!(mock.recorded_requests(), vec!["question 0", "question 1", "question 2"]);
    }

    #[tokio::test]
    async fn test_failure_surfaces_fixed_notice_only() {
        let mock = Arc::new(MockResponder::new());
        mock.queue_error(ResponderError::network("connection refused"));
        let session = session_with(mock);
        let mut rx = session.subscribe();

        session.submit("hello").unwrap();
        let event = wait_for(&mut rx, |e| matches!(e, SessionEvent::Error { .. })).await;

        let SessionEvent::Error { message } = event else {
            unreachable!()
        };
        assert_eq!(message, FAILURE_NOTICE);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some(FAILURE_NOTICE));
        assert!(!snapshot.pending);
        // No bot message was appended
        assert_eq!(snapshot.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_next_submission_clears_error() {
        let mock = Arc::new(MockResponder::new());
        mock.queue_error(ResponderError::network("boom"));
        mock.queue_reply("all good");
        let session = session_with(Arc::clone(&mock) as Arc<dyn Responder>);
        let mut rx = session.subscribe();

        session.submit("first").unwrap();
        wait_for(&mut rx, |e| matches!(e, SessionEvent::Error { .. })).await;
        assert!(session.snapshot().error.is_some());

        session.submit("second").unwrap();
        assert!(session.snapshot().error.is_none());
        wait_for(&mut rx, is_bot_message).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_greeting_scenario_with_simulated_responder() {
        let session = session_with(Arc::new(SimulatedResponder::default()));
        let mut rx = session.subscribe();

        let start = tokio::time::Instant::now();
        session.submit("Hello").unwrap();
        assert!(session.snapshot().pending);

        let event = wait_for(&mut rx, is_bot_message).await;
        let elapsed = start.elapsed();

        let SessionEvent::Message { message } = event else {
            unreachable!()
        };
        assert_eq!(message.text, templates::GREETING);
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(3000));
        assert!(!session.snapshot().pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_react_scenario_returns_template_verbatim() {
        let session = session_with(Arc::new(SimulatedResponder::default()));
        let mut rx = session.subscribe();

        session.submit("Can you show me a React component?").unwrap();
        let event = wait_for(&mut rx, is_bot_message).await;

        let SessionEvent::Message { message } = event else {
            unreachable!()
        };
        assert_eq!(message.text, templates::REACT_SAMPLE);
    }

    #[tokio::test]
    async fn test_event_order_for_one_round_trip() {
        let mock = Arc::new(MockResponder::new());
        mock.queue_reply("ok");
        let session = session_with(mock);
        let mut rx = session.subscribe();

        session.submit("hello").unwrap();

        // user message, pending on, bot message, pending off
        let mut events = Vec::new();
        for _ in 0..4 {
            events.push(rx.recv().await.unwrap());
        }
        assert!(matches!(
            &events[0],
            SessionEvent::Message { message } if message.sender == MessageSender::User
        ));
        assert!(matches!(events[1], SessionEvent::StateChange { pending: true }));
        assert!(matches!(
            &events[2],
            SessionEvent::Message { message } if message.sender == MessageSender::Bot
        ));
        assert!(matches!(events[3], SessionEvent::StateChange { pending: false }));
    }
}
