//! # reattempt
//!
//! Async retry executor for embedding inside any asynchronous call site
//! (network calls, I/O, flaky external services), supporting:
//! - A caller-supplied failure policy deciding continue/stop after each failure
//! - A caller-supplied delay policy computing the wait between attempts
//! - An attempt scope exposing the 1-based attempt number to all collaborators
//! - `skip`: re-run the current attempt after a delay, without counting it
//! - Cancellation transparency via `tokio_util::sync::CancellationToken`
//!
//! Backoff curves, jitter, and circuit breaking are deliberately left to the
//! caller: a delay policy is an ordinary function of the current scope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use reattempt::{Retry, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let value = Retry::builder()
//!         .max_count(5)
//!         .delay_policy(|_: &Scope| Duration::from_millis(200))
//!         .failure_policy(|scope: &Scope, _: &std::io::Error| scope.attempt() < 4)
//!         .build()
//!         .run(|scope| async move {
//!             if scope.attempt() < 3 {
//!                 Err(std::io::Error::other("flaky"))
//!             } else {
//!                 Ok(format!("succeeded on attempt {}", scope.attempt()))
//!             }
//!         })
//!         .await?;
//!
//!     println!("{value}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use error::{RetryError, RetryResult};
pub use executor::{DEFAULT_MAX_COUNT, Retry, RetryBuilder, retry};
pub use policy::{DEFAULT_DELAY, DelayPolicy, FailurePolicy, always_retry, fixed_delay};
pub use scope::{AttemptOutcome, DoingScope, Scope};

// Module declarations
pub mod error;
pub mod executor;
pub mod policy;
pub mod scope;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use reattempt::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        AttemptOutcome, CancellationToken, DelayPolicy, DoingScope, FailurePolicy, Retry,
        RetryBuilder, RetryError, RetryResult, Scope, retry,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_MAX_COUNT, 3);
        assert_eq!(DEFAULT_DELAY, Duration::from_millis(5_000));
    }
}
