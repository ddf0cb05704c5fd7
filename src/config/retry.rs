//! Retry policy for backend requests.
//!
//! Connection failures, timeouts and 5xx responses on idempotent requests are
//! retried; everything else fails immediately.
//!
//! ```toml
//! [retry]
//! enabled = true
//! max_retries = 3
//! base_delay_ms = 100
//! strategy = "exponential"
//! timeout_seconds = 30
//! jitter_factor = 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategy {
    /// base
    Constant,
    /// base × attempt
    Linear,
    /// base × 2^(attempt-1)
    #[default]
    Exponential,
    /// base × fib(attempt)
    Fibonacci,
}

impl RetryStrategy {
    /// Delay multiplier for a 1-indexed retry attempt.
    fn multiplier(self, attempt: u32) -> f64 {
        let attempt = attempt.max(1);
        match self {
            Self::Constant => 1.0,
            Self::Linear => f64::from(attempt),
            Self::Exponential => 2.0_f64.powi(attempt as i32 - 1),
            Self::Fibonacci => {
                let (mut previous, mut current) = (0u64, 1u64);
                for _ in 1..attempt {
                    (previous, current) = (current, previous.saturating_add(current));
                }
                current as f64
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub enabled: bool,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub strategy: RetryStrategy,
    /// Give up once this much time has passed since the first attempt
    pub timeout_seconds: u64,
    /// Fraction of each delay added as jitter, in `[0, 1]`
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            base_delay_ms: 100,
            strategy: RetryStrategy::Exponential,
            timeout_seconds: 30,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Delay before retry number `attempt` (1-indexed).
    ///
    /// Jitter is deterministic (half the configured factor) so runs are
    /// reproducible. A single delay never exceeds the overall timeout.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay_ms as f64 * self.strategy.multiplier(attempt);
        let jittered_ms = base_ms * (1.0 + self.jitter_factor.clamp(0.0, 1.0) * 0.5);
        let capped_ms = jittered_ms.min(self.timeout_seconds.saturating_mul(1000) as f64);
        Duration::from_millis(capped_ms as u64)
    }

    /// Whether another attempt is allowed after `attempt` retries and `elapsed` time.
    pub fn should_retry(&self, attempt: u32, elapsed: Duration) -> bool {
        self.enabled && attempt < self.max_retries && elapsed < self.timeout()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(format!(
                "retry.jitter_factor must be between 0 and 1, got {}",
                self.jitter_factor
            ));
        }
        Ok(())
    }
}
