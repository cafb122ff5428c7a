//! Simulated responder
//!
//! Stands in for a real backend: a keyword lookup over canned
//! templates, behind an artificial delay modeling network latency.

use super::{rules, Responder, ResponderError};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

const DEFAULT_DELAY_MIN: Duration = Duration::from_millis(1000);
const DEFAULT_DELAY_MAX: Duration = Duration::from_millis(3000);

/// Configuration for the simulated responder
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    /// Inclusive lower bound on the artificial delay
    pub delay_min: Duration,
    /// Exclusive upper bound on the artificial delay
    pub delay_max: Duration,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            delay_min: DEFAULT_DELAY_MIN,
            delay_max: DEFAULT_DELAY_MAX,
        }
    }
}

impl ResponderConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            delay_min: env_millis("MOCKINGBIRD_DELAY_MIN_MS").unwrap_or(defaults.delay_min),
            delay_max: env_millis("MOCKINGBIRD_DELAY_MAX_MS").unwrap_or(defaults.delay_max),
        }
    }
}

fn env_millis(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}

/// Responder with canned replies and uniform random latency
pub struct SimulatedResponder {
    config: ResponderConfig,
}

impl SimulatedResponder {
    pub fn new(config: ResponderConfig) -> Self {
        Self { config }
    }

    /// Draw a delay uniformly from `[delay_min, delay_max)`. Only the
    /// delay is randomized; template selection is deterministic.
    fn draw_delay(&self) -> Duration {
        let min = self.config.delay_min;
        let max = self.config.delay_max;
        if max <= min {
            return min;
        }
        let millis = rand::thread_rng().gen_range(min.as_millis()..max.as_millis());
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}

impl Default for SimulatedResponder {
    fn default() -> Self {
        Self::new(ResponderConfig::default())
    }
}

#[async_trait]
impl Responder for SimulatedResponder {
    async fn respond(&self, input: &str) -> Result<String, ResponderError> {
        tokio::time::sleep(self.draw_delay()).await;

        let rule = rules::match_rule(input).map_or("fallback", |rule| rule.name);
        tracing::debug!(rule, "Selected reply template");

        Ok(rules::pick_template(input).to_string())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
