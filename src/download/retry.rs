//! Bounded retry of transient download failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::{Error, Result};

/// Default maximum number of attempts, including the first one.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default cap on total elapsed wall-clock time.
const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(60);

/// Default fixed wait between attempts.
const DEFAULT_WAIT: Duration = Duration::from_secs(3);

/// Retry policy with a fixed interval and two stop bounds.
///
/// An operation is retried only while its error satisfies `retry_on`. The
/// attempt-count and elapsed-time bounds are checked after every failed
/// attempt; whichever limit is reached first wins, and the last error is
/// returned to the caller.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the initial one.
    pub max_attempts: u32,

    /// Maximum elapsed wall-clock time across all attempts.
    pub max_elapsed: Duration,

    /// Fixed wait between attempts.
    pub wait: Duration,

    /// Predicate deciding whether an error is worth retrying.
    pub retry_on: fn(&Error) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_elapsed: DEFAULT_MAX_ELAPSED,
            wait: DEFAULT_WAIT,
            retry_on: Error::is_transient,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with custom bounds and the default transient-error
    /// predicate.
    pub fn new(max_attempts: u32, wait: Duration, max_elapsed: Duration) -> Self {
        Self {
            max_attempts,
            max_elapsed,
            wait,
            ..Default::default()
        }
    }

    /// Replace the retryable-error predicate.
    pub fn with_retry_on(mut self, retry_on: fn(&Error) -> bool) -> Self {
        self.retry_on = retry_on;
        self
    }

    /// Drive `operation` until it succeeds, fails permanently, or a bound
    /// is hit.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let mut attempt: u32 = 1;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if (self.retry_on)(&e) => e,
                Err(e) => return Err(e),
            };

            if attempt >= self.max_attempts {
                tracing::warn!("Giving up after {} attempts: {}", attempt, error);
                return Err(error);
            }
            if started.elapsed() >= self.max_elapsed {
                tracing::warn!(
                    "Giving up after {:.0?} elapsed on attempt {}: {}",
                    started.elapsed(),
                    attempt,
                    error
                );
                return Err(error);
            }

            tracing::warn!(
                "Attempt {} failed, retrying in {:?}: {}",
                attempt,
                self.wait,
                error
            );
            sleep(self.wait).await;
            attempt += 1;
        }
    }
}
