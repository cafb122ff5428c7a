//! Conversation state types

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Messages
// ============================================================================

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    User,
    Bot,
}

/// A single chat message.
///
/// Immutable once created. Messages are owned by the session's log,
/// which is append-only: entries are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique within a session, strictly increasing in append order
    pub id: u64,
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Render the creation time the way the widget displays it:
    /// 24-hour `HH:mm`, in the server's local timezone.
    pub fn formatted_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Observable session states.
///
/// A responder failure is not a state of its own: it leaves the session
/// in `Idle` with an error annotation that the next accepted submission
/// clears. The annotation lives in the session log, outside the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatState {
    /// Ready for user input, no pending operations
    #[default]
    Idle,

    /// A responder invocation is outstanding; submissions are rejected
    AwaitingResponse,
}

impl ChatState {
    /// Check whether a responder invocation is outstanding
    pub fn is_pending(self) -> bool {
        matches!(self, ChatState::AwaitingResponse)
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now(),
        }
    }
}
