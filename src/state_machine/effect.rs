//! Effects produced by state transitions

use super::state::MessageSender;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the session log
    AppendMessage {
        sender: MessageSender,
        text: String,
    },

    /// Clear the error annotation
    ClearError,

    /// Set the error annotation shown to the user
    SetError { message: String },

    /// Invoke the responder with the trimmed input as a background task
    InvokeResponder { input: String },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: MessageSender::User,
            text: text.into(),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: MessageSender::Bot,
            text: text.into(),
        }
    }

    pub fn invoke_responder(input: impl Into<String>) -> Self {
        Effect::InvokeResponder {
            input: input.into(),
        }
    }

    pub fn set_error(message: impl Into<String>) -> Self {
        Effect::SetError {
            message: message.into(),
        }
    }
}
