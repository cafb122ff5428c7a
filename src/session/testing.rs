//! Mock responder for tests

use crate::responder::{Responder, ResponderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock responder that returns queued replies without delay
pub struct MockResponder {
    replies: Mutex<VecDeque<Result<String, ResponderError>>>,
    /// Record of all inputs received
    requests: Mutex<Vec<String>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    /// Queue an error outcome
    pub fn queue_error(&self, error: ResponderError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded inputs
    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, input: &str) -> Result<String, ResponderError> {
        self.requests.lock().unwrap().push(input.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ResponderError::unknown("No mock reply queued")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
