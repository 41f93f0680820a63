//! buildwatch.toml configuration parser.

use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_interval_secs() -> u64 {
    300
}

/// Which jobs to watch and where to find them.
///
/// Immutable after construction; read-only input to the checker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    /// Jenkins host, `host:port`.
    pub host: String,
    /// Job names to check, in check order. Assumed unique; uniqueness is
    /// not enforced.
    pub jobs: Vec<String>,
    /// Seconds between checking passes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl CheckConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CheckConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
