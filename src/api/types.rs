//! API request and response types

use crate::state_machine::{ChatMessage, MessageSender, SessionContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat submission
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub accepted: bool,
}

/// Session descriptor on the wire
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&SessionContext> for SessionView {
    fn from(context: &SessionContext) -> Self {
        Self {
            id: context.session_id.clone(),
            created_at: context.created_at,
        }
    }
}

/// One message on the wire. `time` is the 24-hour `HH:mm` rendering the
/// widget displays next to each message.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: u64,
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub time: String,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp,
            time: message.formatted_time(),
        }
    }
}

/// Response to session creation
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionView,
}

/// Snapshot of one session
#[derive(Debug, Serialize)]
pub struct SessionSnapshotResponse {
    pub session: SessionView,
    pub messages: Vec<MessageView>,
    pub pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
