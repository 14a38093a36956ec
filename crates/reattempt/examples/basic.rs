//! Basic example: retrying a flaky operation with custom policies.
//!
//! Run with logging enabled to watch the loop's decisions:
//! `RUST_LOG=debug cargo run --example basic`

use std::time::Duration;

use reattempt::{Retry, Scope};

#[derive(Debug, thiserror::Error)]
#[error("service unavailable")]
struct ServiceUnavailable;

/// Pretend network call that only answers on the third try.
async fn fetch_greeting(attempt: u32) -> Result<String, ServiceUnavailable> {
    if attempt < 3 {
        Err(ServiceUnavailable)
    } else {
        Ok(format!("hello from attempt {attempt}"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let greeting = Retry::builder()
        .max_count(5)
        .delay_policy(|scope: &Scope| Duration::from_millis(100 * u64::from(scope.attempt())))
        .failure_policy(|scope: &Scope, error: &ServiceUnavailable| {
            eprintln!("attempt {} failed: {error}", scope.attempt());
            true
        })
        .build()
        .run(|scope| async move { fetch_greeting(scope.attempt()).await })
        .await?;

    println!("{greeting}");
    Ok(())
}
