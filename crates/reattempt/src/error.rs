//! Error types for retry invocations.
//!
//! The taxonomy separates configuration mistakes, exhausted work failures,
//! and cooperative cancellation. A skip is not an error and never appears
//! here; it is internal to one attempt.

use thiserror::Error;

/// Result alias for one retry invocation: the caller's success type against
/// [`RetryError`] wrapping the caller's error type.
pub type RetryResult<T, E> = std::result::Result<T, RetryError<E>>;

/// Terminal failure of a retry invocation.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// `max_count` was zero. Raised synchronously, before the first attempt
    /// runs; the work is never invoked.
    #[error("max_count must be greater than zero")]
    InvalidMaxCount,

    /// The invocation was torn down through its cancellation token.
    ///
    /// Never produced from a work failure: cancellation bypasses the failure
    /// policy and the delay policy, and carries no work error.
    #[error("retry invocation cancelled")]
    Cancelled,

    /// The work kept failing: either the failure policy stopped the loop, or
    /// the attempt ceiling was reached while the policy asked to continue.
    ///
    /// Only the error from the final attempt is retained; earlier failures
    /// were each reported once to the failure policy and then discarded.
    #[error("work failed after {attempts} attempt(s)")]
    Exhausted {
        /// Counted attempts that ran before giving up. Skips are excluded.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        source: E,
    },
}

impl<E> RetryError<E> {
    /// The final work error, if the invocation failed through the work.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            Self::Exhausted { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Consume the error, returning the final work error if there is one.
    pub fn into_last_error(self) -> Option<E> {
        match self {
            Self::Exhausted { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the invocation ended through cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, PartialEq, Eq, Error)]
    #[error("attempt {0} failed")]
    struct AttemptError(u32);

    #[test]
    fn display_messages() {
        let invalid: RetryError<AttemptError> = RetryError::InvalidMaxCount;
        assert_eq!(invalid.to_string(), "max_count must be greater than zero");

        let cancelled: RetryError<AttemptError> = RetryError::Cancelled;
        assert_eq!(cancelled.to_string(), "retry invocation cancelled");

        let exhausted = RetryError::Exhausted {
            attempts: 3,
            source: AttemptError(3),
        };
        assert_eq!(exhausted.to_string(), "work failed after 3 attempt(s)");
    }

    #[test]
    fn exhausted_chains_the_work_error_as_source() {
        let exhausted = RetryError::Exhausted {
            attempts: 2,
            source: AttemptError(2),
        };
        let source = exhausted.source().expect("source should be set");
        assert_eq!(source.to_string(), "attempt 2 failed");
    }

    #[test]
    fn accessors_expose_only_work_failures() {
        let exhausted = RetryError::Exhausted {
            attempts: 1,
            source: AttemptError(1),
        };
        assert_eq!(exhausted.last_error(), Some(&AttemptError(1)));
        assert_eq!(exhausted.into_last_error(), Some(AttemptError(1)));

        let cancelled: RetryError<AttemptError> = RetryError::Cancelled;
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.last_error(), None);
        assert_eq!(cancelled.into_last_error(), None);
    }
}
