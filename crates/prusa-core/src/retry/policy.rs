use std::time::Duration;

use crate::config::RetryConfig;

/// Exponential backoff policy: strict doubling from `initial_delay`, capped at `max_delay`.
///
/// No jitter is applied; delays are reproducible run to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts the loop makes (the first try counts as one).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(8000),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            initial_delay: Duration::from_millis(cfg.initial_retry_delay_ms),
            max_delay: Duration::from_millis(cfg.max_retry_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// Delay before the first retry; clamped to `max_delay` when `initial_delay` exceeds it.
    pub fn first_delay(&self) -> Duration {
        self.initial_delay.min(self.max_delay)
    }

    /// Delay that follows `current`: doubled, then capped.
    pub fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }

    /// The full delay schedule between attempts for a persistently failing operation.
    pub fn delays(&self) -> Vec<Duration> {
        let mut out = Vec::new();
        let mut delay = self.first_delay();
        for _ in 1..self.max_retries {
            out.push(delay);
            delay = self.next_delay(delay);
        }
        out
    }
}
