//! Attempt scopes handed to collaborators, and the per-attempt outcome type.
//!
//! The executor exposes two views of its internal state: [`Scope`], the
//! read-only view given to delay and failure policies, and [`DoingScope`],
//! the richer view given to the work itself, which adds [`skip`].
//!
//! [`skip`]: DoingScope::skip

/// Read-only view of the retry state, handed to delay and failure policies.
///
/// A scope is valid for one policy invocation; the attempt number it reports
/// is the one that was current during the work invocation whose failure (or
/// skip) triggered the policy call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    attempt: u32,
}

impl Scope {
    pub(crate) fn new(attempt: u32) -> Self {
        Self { attempt }
    }

    /// Current attempt number, starting at 1.
    ///
    /// The number never decreases within one invocation. A skipped attempt
    /// keeps its number; only a counted failure advances it.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

/// View of the retry state handed to the work itself.
///
/// Extends the read capability of [`Scope`] with [`skip`](Self::skip), which
/// aborts the current attempt without counting it.
#[derive(Debug, Clone, Copy)]
pub struct DoingScope {
    scope: Scope,
}

impl DoingScope {
    pub(crate) fn new(attempt: u32) -> Self {
        Self {
            scope: Scope::new(attempt),
        }
    }

    /// Current attempt number, starting at 1.
    pub fn attempt(&self) -> u32 {
        self.scope.attempt()
    }

    /// Abort the current attempt without counting it.
    ///
    /// Returns the outcome the work hands back to the executor:
    ///
    /// ```rust,no_run
    /// # use reattempt::{AttemptOutcome, Retry};
    /// # async fn demo() {
    /// let _ = Retry::<std::io::Error>::new()
    ///     .run(|scope| async move {
    ///         if scope.attempt() == 1 {
    ///             // Redo this attempt after the configured delay,
    ///             // without consuming an attempt.
    ///             return scope.skip();
    ///         }
    ///         AttemptOutcome::Success(())
    ///     })
    ///     .await;
    /// # }
    /// ```
    ///
    /// The executor re-runs the work at the same attempt number after the
    /// configured delay. Neither the failure policy nor the caller ever
    /// observes a skip.
    pub fn skip<T, E>(&self) -> AttemptOutcome<T, E> {
        AttemptOutcome::Skip
    }
}

/// Disposition of a single work invocation.
///
/// Work that never skips can return a plain [`Result`]; it converts via
/// [`From`]. Work that uses [`DoingScope::skip`] returns this type directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome<T, E> {
    /// The attempt produced a value; the invocation ends with it.
    Success(T),
    /// The attempt failed; the failure policy decides what happens next.
    Failure(E),
    /// The attempt asked to be redone, uncounted, after a delay.
    Skip,
}

impl<T, E> From<Result<T, E>> for AttemptOutcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}
