//! Skip example: redo an attempt without consuming the attempt budget.
//!
//! The work polls a "warming up" dependency. While it warms up, the attempt
//! is skipped (re-run after the delay, uncounted); real failures still count
//! against the ceiling.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use reattempt::{AttemptOutcome, Retry, Scope};

#[derive(Debug, thiserror::Error)]
#[error("dependency rejected the request")]
struct Rejected;

static POLLS: AtomicU32 = AtomicU32::new(0);

fn dependency_ready() -> bool {
    POLLS.fetch_add(1, Ordering::SeqCst) >= 2
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let value = Retry::builder()
        .max_count(3)
        .delay_policy(|_: &Scope| Duration::from_millis(50))
        .build()
        .run(|scope| async move {
            if !dependency_ready() {
                println!("attempt {} skipped: still warming up", scope.attempt());
                return scope.skip();
            }
            if scope.attempt() < 2 {
                return AttemptOutcome::Failure(Rejected);
            }
            AttemptOutcome::Success(format!("accepted on attempt {}", scope.attempt()))
        })
        .await?;

    println!("{value}");
    Ok(())
}
