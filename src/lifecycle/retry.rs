//! Bounded retry with exponential backoff for whole sweep runs.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

/// How often, and how patiently, a failed run is repeated.
///
/// # Default Values
///
/// - `max_attempts`: 3 (first try included)
/// - `initial_delay`: 1 second
/// - `max_delay`: 30 seconds
/// - `multiplier`: 2.0
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay before retry number `retry` (0 for the first retry), capped at `max_delay`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(i32::try_from(retry).unwrap_or(i32::MAX));
        let delay = self.initial_delay.mul_f64(factor.clamp(0.0, f64::from(u32::MAX)));
        delay.min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or `policy.max_attempts` attempts have failed.
/// Returns the last error in the latter case.
///
/// A change on `shutdown` (or its sender going away) during a backoff delay ends the
/// retries early with the last error.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    job: &str,
    shutdown: &mut watch::Receiver<bool>,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(job, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt >= policy.max_attempts => return Err(e),
            Err(e) => {
                let delay = policy.delay_for_retry(attempt - 1);
                warn!(job, attempt, error = %e, ?delay, "Attempt failed, retrying");
                tokio::select! {
                    _ = sleep(delay) => attempt += 1,
                    _ = shutdown.changed() => {
                        info!(job, attempt, "Shutdown during backoff, giving up");
                        return Err(e);
                    }
                }
            }
        }
    }
}
