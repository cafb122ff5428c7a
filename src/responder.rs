//! Responder abstraction
//!
//! Provides a common interface for turning one user message into one
//! reply. The simulated implementation is the only one shipped; the
//! trait is the seam where a real backend client would plug in.

mod error;
mod rules;
mod simulated;
pub mod templates;

pub use error::{ResponderError, ResponderErrorKind};
pub use rules::{pick_template, Rule, RULES};
pub use simulated::{ResponderConfig, SimulatedResponder};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for reply generation
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply for one user message. The input arrives already
    /// trimmed and non-empty; the session rejects blank submissions
    /// before they get here.
    async fn respond(&self, input: &str) -> Result<String, ResponderError>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}

/// Logging wrapper for responders
pub struct LoggingResponder {
    inner: Arc<dyn Responder>,
    name: String,
}

impl LoggingResponder {
    pub fn new(inner: Arc<dyn Responder>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl Responder for LoggingResponder {
    async fn respond(&self, input: &str) -> Result<String, ResponderError> {
        let start = std::time::Instant::now();
        let result = self.inner.respond(input).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    responder = %self.name,
                    duration_ms = %duration.as_millis(),
                    input_chars = input.chars().count(),
                    reply_chars = reply.chars().count(),
                    "Responder request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    responder = %self.name,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Responder request failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
