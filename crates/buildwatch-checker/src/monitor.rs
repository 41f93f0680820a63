//! Background polling loop.
//!
//! Runs one checking pass at startup, then one per interval, until the
//! shutdown signal flips. The HTTP side never talks to the monitor; the
//! two meet only at the shared store.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::checker::StabilityChecker;

/// Periodically runs the stability checker until shutdown.
pub struct CheckMonitor {
    checker: StabilityChecker,
    interval: Duration,
}

impl CheckMonitor {
    pub fn new(checker: StabilityChecker, interval: Duration) -> Self {
        Self { checker, interval }
    }

    /// Run checking passes until `shutdown` changes.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            jobs = self.checker.jobs().len(),
            "stability monitor started"
        );

        // First pass up front so the report isn't empty for a whole
        // interval after startup.
        self.run_pass().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    self.run_pass().await;
                }
                _ = shutdown.changed() => {
                    info!("stability monitor shutting down");
                    break;
                }
            }
        }
    }

    async fn run_pass(&self) {
        if self.checker.run().await {
            info!("all jobs stable");
        } else {
            warn!("one or more jobs not stable");
        }
    }
}
