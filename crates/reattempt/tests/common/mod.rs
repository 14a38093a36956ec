//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

/// Error carrying the attempt number that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attempt {0} failed")]
pub struct AttemptError(pub u32);

/// Shared append-only log of attempt numbers, cloneable into closures.
pub fn shared_log() -> Arc<Mutex<Vec<u32>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn record(log: &Arc<Mutex<Vec<u32>>>, value: u32) {
    log.lock().expect("log poisoned").push(value);
}

pub fn entries(log: &Arc<Mutex<Vec<u32>>>) -> Vec<u32> {
    log.lock().expect("log poisoned").clone()
}
