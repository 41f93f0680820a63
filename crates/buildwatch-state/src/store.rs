//! Concurrency-safe job status store.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::JobStatus;

/// Shared mapping from job name to its last observed status.
///
/// `Clone` + `Send` + `Sync` (backed by `Arc`): the checker writes through
/// one handle while any number of HTTP readers snapshot through others.
/// Entries are never removed, so the map is always a complete record of
/// every job checked at least once.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    statuses: Arc<RwLock<BTreeMap<String, JobStatus>>>,
}

impl StatusStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write or overwrite the status for a job.
    pub async fn set(&self, job: &str, status: JobStatus) {
        let mut statuses = self.statuses.write().await;
        statuses.insert(job.to_string(), status);
    }

    /// Clone the current mapping.
    ///
    /// The read lock is released before this returns, so callers encode
    /// the snapshot without blocking the checker. `BTreeMap` iteration
    /// order makes encoding a given snapshot deterministic.
    pub async fn snapshot(&self) -> BTreeMap<String, JobStatus> {
        let statuses = self.statuses.read().await;
        statuses.clone()
    }

    /// Number of jobs recorded so far.
    pub async fn len(&self) -> usize {
        self.statuses.read().await.len()
    }

    /// Whether no job has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.statuses.read().await.is_empty()
    }
}
