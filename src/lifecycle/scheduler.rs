//! Periodic background jobs.
//!
//! [`spawn_periodic`] runs a job on a fixed interval until a shutdown signal arrives.
//! A run that fails is retried as a whole according to a [`RetryPolicy`]; once the
//! attempts are used up the failure is logged and the job waits for its next tick.
//! Runs of the same job never overlap: the next tick is only awaited after the current
//! run (retries included) has finished. A shutdown during a backoff delay skips the
//! remaining retries.

use crate::lifecycle::retry::{retry_with_backoff, RetryPolicy};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Spawns `job` to run every `period`, starting immediately.
///
/// The task ends when `shutdown` turns `true` or its sender is dropped. A run that is
/// already in progress is allowed to finish first.
pub fn spawn_periodic<F, Fut, T, E>(
    name: &'static str,
    period: Duration,
    retry: RetryPolicy,
    mut shutdown: watch::Receiver<bool>,
    mut job: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Display + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(job = name, ?period, "Job started");

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }

            match retry_with_backoff(&retry, name, &mut shutdown, &mut job).await {
                Ok(outcome) => debug!(job = name, %outcome, "Run complete"),
                Err(e) => error!(
                    job = name,
                    attempts = retry.max_attempts,
                    error = %e,
                    "Run failed, waiting for next tick"
                ),
            }
        }

        info!(job = name, "Job stopped");
    })
}
