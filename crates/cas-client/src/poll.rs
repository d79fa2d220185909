//! Retry-until-success, timeout, or cancellation.
//!
//! Every anchor service call runs through [`PollLoop::execute`]. In
//! single-attempt mode the attempt runs once and its result is returned
//! unchanged. In retrying mode transport failures are logged and retried
//! after `poll_interval`, with no attempt cap other than `max_poll_time`.
//!
//! Decode failures are never retried. Cancellation is observed both while
//! an attempt is in flight and while sleeping between attempts; when it
//! fires together with another condition, cancellation wins.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, sleep_until, Instant};

use crate::cancel::CancellationToken;
use crate::error::{CasError, TransportError};

/// How one operation is driven through the loop.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy<'a> {
    pub retry_on_failure: bool,
    /// Bound on a single attempt. Expiry is reported as a transport timeout.
    pub per_attempt_timeout: Option<Duration>,
    pub token: &'a CancellationToken,
}

impl<'a> PollPolicy<'a> {
    /// Run exactly once.
    pub fn once(token: &'a CancellationToken) -> Self {
        Self {
            retry_on_failure: false,
            per_attempt_timeout: None,
            token,
        }
    }

    /// Retry transport failures until success, budget exhaustion, or cancellation.
    pub fn retrying(token: &'a CancellationToken) -> Self {
        Self {
            retry_on_failure: true,
            per_attempt_timeout: None,
            token,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.per_attempt_timeout = Some(timeout);
        self
    }
}

/// Executor shared by every operation of one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLoop {
    poll_interval: Duration,
    max_poll_time: Duration,
}

impl PollLoop {
    pub fn new(poll_interval: Duration, max_poll_time: Duration) -> Self {
        Self {
            poll_interval,
            max_poll_time,
        }
    }

    /// Drive `attempt` according to `policy`.
    ///
    /// # Errors
    ///
    /// - [`CasError::Cancelled`] if the token is or becomes stopped.
    /// - [`CasError::Timeout`] if retrying and `max_poll_time` elapses.
    /// - Otherwise the error of the last attempt.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &'static str,
        policy: PollPolicy<'_>,
        mut attempt: F,
    ) -> Result<T, CasError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CasError>>,
    {
        let started = Instant::now();
        let deadline = started + self.max_poll_time;
        let mut attempts: u32 = 0;

        loop {
            if policy.token.is_cancelled() {
                return Err(CasError::Cancelled { operation });
            }
            if attempts > 0 && Instant::now() >= deadline {
                return Err(self.timeout(operation, attempts));
            }
            attempts += 1;

            let result = tokio::select! {
                biased;
                _ = policy.token.cancelled() => return Err(CasError::Cancelled { operation }),
                _ = sleep_until(deadline), if policy.retry_on_failure => {
                    return Err(self.timeout(operation, attempts));
                }
                result = bounded(operation, policy.per_attempt_timeout, attempt()) => result,
            };

            let err = match result {
                Ok(value) => {
                    tracing::debug!(operation, attempts, "anchor service request succeeded");
                    return Ok(value);
                }
                Err(err) => err,
            };
            if !policy.retry_on_failure || !err.is_retryable() {
                return Err(err);
            }

            tracing::warn!(
                operation,
                attempt = attempts,
                elapsed = ?started.elapsed(),
                "anchor service request failed, retrying in {:?}: {err}",
                self.poll_interval
            );

            tokio::select! {
                biased;
                _ = policy.token.cancelled() => return Err(CasError::Cancelled { operation }),
                _ = sleep_until(deadline) => return Err(self.timeout(operation, attempts)),
                _ = sleep(self.poll_interval) => {}
            }
        }
    }

    fn timeout(&self, operation: &'static str, attempts: u32) -> CasError {
        tracing::warn!(operation, attempts, budget = ?self.max_poll_time, "anchor service retry budget exhausted");
        CasError::Timeout {
            operation,
            budget: self.max_poll_time,
            attempts,
        }
    }
}

async fn bounded<T, Fut>(
    operation: &'static str,
    limit: Option<Duration>,
    fut: Fut,
) -> Result<T, CasError>
where
    Fut: Future<Output = Result<T, CasError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .unwrap_or_else(|_| {
                Err(CasError::Network {
                    operation,
                    source: TransportError::Timeout(limit),
                })
            }),
        None => fut.await,
    }
}
