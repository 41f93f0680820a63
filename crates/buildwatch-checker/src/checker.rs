//! One stability-check pass over the configured jobs.

use std::sync::Arc;

use tracing::{debug, error};

use buildwatch_state::{JobStatus, StatusStore};

use crate::client::StabilityClient;

/// Runs stability checks for a fixed list of jobs and records each outcome
/// in the shared store.
pub struct StabilityChecker {
    client: Arc<dyn StabilityClient>,
    jobs: Vec<String>,
    store: StatusStore,
}

impl StabilityChecker {
    pub fn new(client: Arc<dyn StabilityClient>, jobs: Vec<String>, store: StatusStore) -> Self {
        Self {
            client,
            jobs,
            store,
        }
    }

    /// Run one checking pass.
    ///
    /// Every configured job gets its store entry overwritten exactly once,
    /// in configured order. A failed check is recorded as
    /// [`JobStatus::CheckFailed`] and does not stop the remaining jobs.
    /// The store lock is only taken for the write, never across the
    /// upstream call.
    ///
    /// Returns true iff every job was checked successfully and reported
    /// stable.
    pub async fn run(&self) -> bool {
        let mut all_stable = true;

        for job in &self.jobs {
            debug!(%job, "checking build stability");
            match self.client.is_stable(job).await {
                Ok(true) => {
                    self.store.set(job, JobStatus::Stable).await;
                }
                Ok(false) => {
                    self.store.set(job, JobStatus::NotStable).await;
                    all_stable = false;
                }
                Err(e) => {
                    error!(%job, error = %e, "stability check failed");
                    self.store
                        .set(job, JobStatus::CheckFailed(e.to_string()))
                        .await;
                    all_stable = false;
                }
            }
        }

        all_stable
    }

    /// The configured job list, in check order.
    pub fn jobs(&self) -> &[String] {
        &self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::client::ClientError;

    /// Scripted collaborator: per-job canned responses plus a call log.
    struct ScriptedClient {
        responses: HashMap<String, Result<bool, String>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(responses: &[(&str, Result<bool, &str>)]) -> Arc<Self> {
            Arc::new(Self {
                responses: responses
                    .iter()
                    .map(|(job, r)| {
                        (job.to_string(), r.clone().map_err(|e| e.to_string()))
                    })
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StabilityClient for ScriptedClient {
        async fn is_stable(&self, job: &str) -> Result<bool, ClientError> {
            self.calls.lock().unwrap().push(job.to_string());
            match self.responses.get(job) {
                Some(Ok(stable)) => Ok(*stable),
                Some(Err(e)) => Err(ClientError::Request(e.clone())),
                None => Err(ClientError::Request("unknown job".to_string())),
            }
        }
    }

    fn checker(client: Arc<ScriptedClient>, jobs: &[&str]) -> (StabilityChecker, StatusStore) {
        let store = StatusStore::new();
        let checker = StabilityChecker::new(
            client,
            jobs.iter().map(|j| j.to_string()).collect(),
            store.clone(),
        );
        (checker, store)
    }

    #[tokio::test]
    async fn all_jobs_stable() {
        let client = ScriptedClient::new(&[("build-a", Ok(true)), ("build-b", Ok(true))]);
        let (checker, store) = checker(client, &["build-a", "build-b"]);

        assert!(checker.run().await);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("build-a"), Some(&JobStatus::Stable));
        assert_eq!(snapshot.get("build-b"), Some(&JobStatus::Stable));
    }

    #[tokio::test]
    async fn one_job_not_stable() {
        let client = ScriptedClient::new(&[("build-a", Ok(false)), ("build-b", Ok(true))]);
        let (checker, store) = checker(client, &["build-a", "build-b"]);

        assert!(!checker.run().await);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.get("build-a"), Some(&JobStatus::NotStable));
        assert_eq!(snapshot.get("build-b"), Some(&JobStatus::Stable));
    }

    #[tokio::test]
    async fn check_failure_is_recorded_not_raised() {
        let client = ScriptedClient::new(&[("build-a", Err("timeout"))]);
        let (checker, store) = checker(client, &["build-a"]);

        assert!(!checker.run().await);

        let snapshot = store.snapshot().await;
        assert_eq!(
            snapshot.get("build-a").unwrap().to_string(),
            "Error checking: request failed: timeout"
        );
    }

    #[tokio::test]
    async fn failure_does_not_stop_remaining_jobs() {
        let client = ScriptedClient::new(&[
            ("build-a", Err("connection refused")),
            ("build-b", Ok(true)),
            ("build-c", Ok(false)),
        ]);
        let (checker, store) = checker(client.clone(), &["build-a", "build-b", "build-c"]);

        assert!(!checker.run().await);

        // All three were checked, in configured order.
        assert_eq!(client.calls(), vec!["build-a", "build-b", "build-c"]);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 3);
        assert!(matches!(
            snapshot.get("build-a"),
            Some(JobStatus::CheckFailed(_))
        ));
        assert_eq!(snapshot.get("build-b"), Some(&JobStatus::Stable));
        assert_eq!(snapshot.get("build-c"), Some(&JobStatus::NotStable));
    }

    #[tokio::test]
    async fn every_job_written_exactly_once_per_pass() {
        let client = ScriptedClient::new(&[("build-a", Ok(true)), ("build-b", Err("boom"))]);
        let (checker, store) = checker(client.clone(), &["build-a", "build-b"]);

        checker.run().await;
        checker.run().await;

        // Two passes, one call per job per pass.
        assert_eq!(client.calls().len(), 4);
        // The store still holds exactly one entry per job.
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn later_pass_overwrites_earlier_status() {
        let client = ScriptedClient::new(&[("build-a", Ok(true))]);
        let (checker, store) = checker(client, &["build-a"]);

        assert!(checker.run().await);
        assert_eq!(
            store.snapshot().await.get("build-a"),
            Some(&JobStatus::Stable)
        );

        let flaky = ScriptedClient::new(&[("build-a", Ok(false))]);
        let checker = StabilityChecker::new(flaky, vec!["build-a".to_string()], store.clone());

        assert!(!checker.run().await);
        assert_eq!(
            store.snapshot().await.get("build-a"),
            Some(&JobStatus::NotStable)
        );
    }

    #[tokio::test]
    async fn empty_job_list_is_trivially_stable() {
        let client = ScriptedClient::new(&[]);
        let (checker, store) = checker(client, &[]);

        assert!(checker.run().await);
        assert!(store.is_empty().await);
    }
}
