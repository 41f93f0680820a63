//! Domain types for the job status store.

use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome of the most recent stability check for a single job.
///
/// Stored as a tagged value; the report vocabulary (`"Stable"`,
/// `"Not Stable"`, `"Error checking: <reason>"`) is rendered only at the
/// JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// The last completed build succeeded.
    Stable,
    /// The last completed build did not succeed.
    NotStable,
    /// The check itself failed; the job's real state is unknown.
    CheckFailed(String),
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Stable => f.write_str("Stable"),
            JobStatus::NotStable => f.write_str("Not Stable"),
            JobStatus::CheckFailed(reason) => write!(f, "Error checking: {reason}"),
        }
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_vocabulary() {
        assert_eq!(JobStatus::Stable.to_string(), "Stable");
        assert_eq!(JobStatus::NotStable.to_string(), "Not Stable");
        assert_eq!(
            JobStatus::CheckFailed("timeout".to_string()).to_string(),
            "Error checking: timeout"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&JobStatus::NotStable).unwrap();
        assert_eq!(json, "\"Not Stable\"");

        let json =
            serde_json::to_string(&JobStatus::CheckFailed("connection refused".to_string()))
                .unwrap();
        assert_eq!(json, "\"Error checking: connection refused\"");
    }
}
