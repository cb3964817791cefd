//! Retry of dataset fetches with exponential backoff.
//!
//! Only failures that [`GuideError::is_retryable`] accepts are retried; a
//! 404 or a malformed body fails on the first attempt.

use crate::error::{GuideError, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for fetch attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first. Zero behaves as one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Scale delays by a random factor in `0.5..1.5`.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create the default policy: three attempts starting at 500ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay after the failed attempt `attempt` (0-indexed): `base * 2^attempt`, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)));
        let capped = doubled.min(self.max_delay);

        if self.jitter {
            let factor = rand::rng().random_range(0.5..1.5);
            capped.mul_f64(factor).min(self.max_delay)
        } else {
            capped
        }
    }
}

/// Outcome bookkeeping for a retried fetch.
#[derive(Debug, Clone, Default)]
pub struct RetryStats {
    pub attempts: u32,
    pub total_delay: Duration,
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out.
pub async fn retry_fetch<F, Fut, T>(config: &RetryConfig, mut operation: F) -> (Result<T>, RetryStats)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut stats = RetryStats::default();

    loop {
        let attempt = stats.attempts;
        stats.attempts += 1;

        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Fetch succeeded after {} attempts", stats.attempts);
                }
                return (Ok(value), stats);
            }
            Err(e) => e,
        };

        if !err.is_retryable() {
            debug!("Fetch error is not retryable: {}", err);
            return (Err(err), stats);
        }
        if stats.attempts >= max_attempts {
            if max_attempts > 1 {
                warn!("All {} fetch attempts failed. Last error: {}", max_attempts, err);
            }
            return (Err(err), stats);
        }

        let delay = config.delay_for(attempt);
        stats.total_delay += delay;
        warn!(
            "Fetch attempt {}/{} failed: {}. Retrying in {:?}",
            stats.attempts, max_attempts, err, delay
        );
        tokio::time::sleep(delay).await;
    }
}

/// Whether an HTTP status warrants another attempt.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    GuideError::Network {
        message: String::new(),
        status: Some(status),
    }
    .is_retryable()
}
