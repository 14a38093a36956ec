//! The retry control loop.
//!
//! One [`Retry`] value drives one invocation: it repeatedly runs the work,
//! classifies each attempt's disposition, consults the failure policy on
//! counted failures, sleeps for the delay policy's duration between re-runs,
//! and surfaces the last failure once the policy declines or the ceiling is
//! reached. Cancellation through the configured token supersedes every other
//! control path and is re-checked after every suspension point.

use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{RetryError, RetryResult};
use crate::policy::{DelayPolicy, FailurePolicy, always_retry, fixed_delay, DEFAULT_DELAY};
use crate::scope::{AttemptOutcome, DoingScope, Scope};

/// Attempt ceiling when none is configured.
pub const DEFAULT_MAX_COUNT: u32 = 3;

/// Configured retry executor for one invocation.
///
/// Built through [`Retry::builder`]; [`Retry::new`] uses the defaults
/// (3 attempts, a fixed 5 second delay, retry on every failure, no
/// cancellation token). Running consumes the executor, since policies may
/// carry per-invocation state.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use reattempt::{Retry, Scope};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let value = Retry::builder()
///     .max_count(5)
///     .delay_policy(|_: &Scope| Duration::from_millis(200))
///     .failure_policy(|scope: &Scope, _: &std::io::Error| scope.attempt() < 4)
///     .build()
///     .run(|scope| async move {
///         if scope.attempt() < 3 {
///             Err(std::io::Error::other("flaky"))
///         } else {
///             Ok(scope.attempt())
///         }
///     })
///     .await?;
/// assert_eq!(value, 3);
/// # Ok(())
/// # }
/// ```
pub struct Retry<E> {
    max_count: u32,
    delay_policy: Box<dyn DelayPolicy>,
    failure_policy: Box<dyn FailurePolicy<E>>,
    cancellation: Option<CancellationToken>,
}

impl<E: Sync + 'static> Retry<E> {
    /// Executor with all defaults.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring an executor.
    pub fn builder() -> RetryBuilder<E> {
        RetryBuilder::new()
    }
}

impl<E: Sync + 'static> Default for Retry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Retry<E> {
    /// Run `work` until it succeeds, the failure policy stops the loop, the
    /// attempt ceiling is reached, or the invocation is cancelled.
    ///
    /// The work receives a [`DoingScope`] bound to the current attempt number
    /// and may return a plain [`Result`] or an [`AttemptOutcome`] (needed for
    /// [`DoingScope::skip`]). Attempts run strictly one after another on the
    /// caller's task; no attempt begins before the previous one's disposition
    /// is known.
    pub async fn run<T, W, Fut, O>(mut self, mut work: W) -> RetryResult<T, E>
    where
        W: FnMut(DoingScope) -> Fut,
        Fut: Future<Output = O>,
        O: Into<AttemptOutcome<T, E>>,
    {
        if self.max_count == 0 {
            return Err(RetryError::InvalidMaxCount);
        }

        let token = self.cancellation.clone();
        let mut attempt: u32 = 1;

        loop {
            let scope = Scope::new(attempt);
            debug!(attempt, "running attempt");

            let outcome = match race(token.as_ref(), work(DoingScope::new(attempt))).await {
                Some(outcome) => outcome.into(),
                None => return cancelled(attempt),
            };
            // The work may have observed the token itself and returned
            // normally; cancellation still wins over whatever it produced.
            if is_cancelled(token.as_ref()) {
                return cancelled(attempt);
            }

            let error = match outcome {
                AttemptOutcome::Success(value) => {
                    debug!(attempt, "attempt succeeded");
                    return Ok(value);
                }
                AttemptOutcome::Skip => {
                    // Uncounted re-run: same attempt number, failure policy
                    // not consulted.
                    debug!(attempt, "attempt skipped");
                    self.pause(&scope, token.as_ref()).await?;
                    continue;
                }
                AttemptOutcome::Failure(error) => error,
            };

            debug!(attempt, "attempt failed, consulting failure policy");
            let keep_retrying = match race(
                token.as_ref(),
                self.failure_policy.should_retry(&scope, &error),
            )
            .await
            {
                Some(decision) => decision,
                None => return cancelled(attempt),
            };
            if is_cancelled(token.as_ref()) {
                return cancelled(attempt);
            }

            if !keep_retrying {
                debug!(attempt, "failure policy stopped retrying");
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    source: error,
                });
            }
            if attempt >= self.max_count {
                warn!(
                    attempt,
                    max_count = self.max_count,
                    "attempt ceiling reached"
                );
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    source: error,
                });
            }

            self.pause(&scope, token.as_ref()).await?;
            attempt += 1;
        }
    }

    /// Sleep for the policy-computed delay, aborting early on cancellation.
    async fn pause(
        &mut self,
        scope: &Scope,
        token: Option<&CancellationToken>,
    ) -> RetryResult<(), E> {
        let delay = self.delay_policy.delay(scope);
        debug!(
            attempt = scope.attempt(),
            delay_ms = delay.as_millis() as u64,
            "waiting before re-run"
        );
        match race(token, tokio::time::sleep(delay)).await {
            Some(()) => Ok(()),
            None => Err(RetryError::Cancelled),
        }
    }
}

impl<E> fmt::Debug for Retry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("max_count", &self.max_count)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

/// Run `work` with the default executor: 3 attempts, a fixed 5 second delay,
/// retry on every failure.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let value = reattempt::retry(|_scope| async {
///     Ok::<_, std::io::Error>("done")
/// })
/// .await?;
/// assert_eq!(value, "done");
/// # Ok(())
/// # }
/// ```
pub async fn retry<T, E, W, Fut, O>(work: W) -> RetryResult<T, E>
where
    E: Sync + 'static,
    W: FnMut(DoingScope) -> Fut,
    Fut: Future<Output = O>,
    O: Into<AttemptOutcome<T, E>>,
{
    Retry::new().run(work).await
}

/// Builder for [`Retry`]; every knob is optional.
pub struct RetryBuilder<E> {
    max_count: u32,
    delay_policy: Box<dyn DelayPolicy>,
    failure_policy: Box<dyn FailurePolicy<E>>,
    cancellation: Option<CancellationToken>,
}

impl<E: Sync + 'static> RetryBuilder<E> {
    /// Builder seeded with the defaults.
    pub fn new() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            delay_policy: Box::new(fixed_delay(DEFAULT_DELAY)),
            failure_policy: Box::new(always_retry::<E>()),
            cancellation: None,
        }
    }
}

impl<E: Sync + 'static> Default for RetryBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RetryBuilder<E> {
    /// Maximum number of counted attempts. Must be greater than zero;
    /// zero is rejected by [`Retry::run`] before any attempt runs.
    pub fn max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    /// Wait computed before each retry or skip re-run.
    pub fn delay_policy(mut self, policy: impl DelayPolicy + 'static) -> Self {
        self.delay_policy = Box::new(policy);
        self
    }

    /// Decision consulted after each counted failure.
    pub fn failure_policy(mut self, policy: impl FailurePolicy<E> + 'static) -> Self {
        self.failure_policy = Box::new(policy);
        self
    }

    /// External cancellation signal, checked at every suspension point.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Build the executor.
    pub fn build(self) -> Retry<E> {
        Retry {
            max_count: self.max_count,
            delay_policy: self.delay_policy,
            failure_policy: self.failure_policy,
            cancellation: self.cancellation,
        }
    }
}

impl<E> fmt::Debug for RetryBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryBuilder")
            .field("max_count", &self.max_count)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

/// Race `fut` against the cancellation token, if one is configured.
///
/// `None` means the token fired first; the loop must unwind without touching
/// any policy.
async fn race<F>(token: Option<&CancellationToken>, fut: F) -> Option<F::Output>
where
    F: Future,
{
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => None,
                output = fut => Some(output),
            }
        }
        None => Some(fut.await),
    }
}

fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(CancellationToken::is_cancelled)
}

fn cancelled<T, E>(attempt: u32) -> RetryResult<T, E> {
    debug!(attempt, "invocation cancelled");
    Err(RetryError::Cancelled)
}
