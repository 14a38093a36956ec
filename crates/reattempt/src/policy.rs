//! Delay and failure policies consulted by the retry executor.
//!
//! Both policies are ordinary functions of the current [`Scope`]; closures
//! implement the traits directly. Stateful policies (for example, one that
//! accumulates the errors it has seen) implement the traits on their own
//! types and keep history in `&mut self`.

use std::time::Duration;

use async_trait::async_trait;

use crate::scope::Scope;

/// Wait between attempts when no delay policy is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5_000);

/// Computes the wait before the next attempt or skip re-run.
///
/// Consulted after every non-terminal disposition that leads to another work
/// invocation: a counted retry and an uncounted skip both wait for the
/// policy-computed duration first.
pub trait DelayPolicy: Send {
    /// Wait duration before the upcoming re-run.
    fn delay(&mut self, scope: &Scope) -> Duration;
}

impl<F> DelayPolicy for F
where
    F: FnMut(&Scope) -> Duration + Send,
{
    fn delay(&mut self, scope: &Scope) -> Duration {
        (*self)(scope)
    }
}

/// Constant-delay policy; the executor default uses [`DEFAULT_DELAY`].
pub fn fixed_delay(delay: Duration) -> impl DelayPolicy + 'static {
    move |_: &Scope| delay
}

/// Decides, after a failed attempt, whether the executor keeps retrying.
///
/// The policy is a notification plus a continue/stop decision, not an
/// accumulator: it sees each failure exactly once and only the most recent
/// error is retained by the loop. The method is async so a policy may consult
/// external state; it runs on the executor's own task, never concurrently
/// with the work.
#[async_trait]
pub trait FailurePolicy<E>: Send {
    /// `true` continues retrying (subject to the attempt ceiling); `false`
    /// stops the loop with `error` as the terminal failure.
    async fn should_retry(&mut self, scope: &Scope, error: &E) -> bool;
}

#[async_trait]
impl<E, F> FailurePolicy<E> for F
where
    E: Sync,
    F: FnMut(&Scope, &E) -> bool + Send,
{
    async fn should_retry(&mut self, scope: &Scope, error: &E) -> bool {
        (*self)(scope, error)
    }
}

/// Policy that retries on every failure; the executor default.
pub fn always_retry<E: Sync + 'static>() -> impl FailurePolicy<E> + 'static {
    |_: &Scope, _: &E| true
}
