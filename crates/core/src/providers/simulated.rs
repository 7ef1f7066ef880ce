use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::settings::simulate_latency;

use super::traits::{Mutation, RemoteBackend};

/// Stand-in for a network round trip: sleeps for the requested latency,
/// then succeeds unless a failure has been armed.
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    pending_failures: AtomicUsize,
    always_fail: AtomicBool,
    confirmations: AtomicUsize,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` confirmations fail.
    pub fn fail_next(&self, count: usize) {
        self.pending_failures.fetch_add(count, Ordering::SeqCst);
    }

    /// Make every confirmation fail (or succeed again with `false`).
    pub fn set_always_fail(&self, fail: bool) {
        self.always_fail.store(fail, Ordering::SeqCst);
    }

    /// How many confirmations have been attempted.
    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        if self.always_fail.load(Ordering::SeqCst) {
            return true;
        }
        self.pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl RemoteBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "Simulated"
    }

    async fn confirm(&self, mutation: &Mutation, latency: Duration) -> Result<(), CoreError> {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        simulate_latency(latency).await;

        if self.take_failure() {
            debug!(
                "Simulated {} of investment {} rejected",
                mutation.operation(),
                mutation.investment_id()
            );
            return Err(CoreError::SimulatedFailure {
                operation: mutation.operation().to_string(),
                message: format!("injected failure for investment {}", mutation.investment_id()),
            });
        }
        Ok(())
    }
}
