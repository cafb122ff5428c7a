//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user submitted text from the input box
    UserMessage { text: String },

    /// The responder resolved with a reply
    ResponderSuccess { reply: String },

    /// The responder call failed. The simulated responder never emits
    /// this; the pathway exists for a real backend behind the trait.
    ResponderFailure { message: String },
}
