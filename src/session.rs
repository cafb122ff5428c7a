//! Session runtime
//!
//! Owns each conversation's state and fans events out to SSE
//! subscribers. Sessions are created on demand and live until process
//! exit; nothing is persisted.

mod runtime;

#[cfg(test)]
pub mod testing;

pub use runtime::{ChatSession, SessionSnapshot};

use crate::responder::Responder;
use crate::state_machine::ChatMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A message was appended to the log
    Message { message: ChatMessage },
    /// The pending flag changed
    StateChange { pending: bool },
    /// A responder failure was surfaced to the user
    Error { message: String },
}

/// Manager for all live sessions
pub struct SessionManager {
    responder: Arc<dyn Responder>,
    sessions: RwLock<HashMap<String, Arc<ChatSession>>>,
}

impl SessionManager {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            responder,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session with a fresh id and an empty log
    pub async fn create(&self) -> Arc<ChatSession> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(ChatSession::new(id.clone(), self.responder.clone()));
        self.sessions.write().await.insert(id, Arc::clone(&session));
        session
    }

    pub async fn get(&self, session_id: &str) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(session_id).cloned()
    }
}
