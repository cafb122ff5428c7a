//! Responder error types

#![allow(dead_code)] // Constructors exercised through the session tests

use thiserror::Error;

/// Responder error with classification.
///
/// The simulated responder always resolves; these exist for a real
/// backend behind the `Responder` trait, and so the session's failure
/// path can be exercised in tests.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResponderError {
    pub kind: ResponderErrorKind,
    pub message: String,
}

impl ResponderError {
    pub fn new(kind: ResponderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::ServerError, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ResponderErrorKind::Unknown, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Unknown error
    Unknown,
}

impl ResponderErrorKind {
    /// Whether a real backend caller could reasonably retry. The
    /// session never retries automatically; this feeds logging so a
    /// human can decide to resubmit.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }
}
