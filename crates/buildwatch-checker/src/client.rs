//! Jenkins stability client.
//!
//! Fetches a job's last completed build over HTTP and reports whether it
//! succeeded.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors from a single stability query.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Body(String),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Upstream CI collaborator: can a job be reported stable right now?
///
/// An `Err` means the check itself failed; it is never interpreted as
/// "unstable".
#[async_trait]
pub trait StabilityClient: Send + Sync {
    async fn is_stable(&self, job: &str) -> Result<bool, ClientError>;
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Queries a Jenkins server for build stability.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Jenkins server, `host:port`.
    host: String,
    /// Budget for the whole round-trip, connect included.
    timeout: Duration,
}

/// The slice of Jenkins' build JSON we care about.
#[derive(Debug, Deserialize)]
struct BuildInfo {
    result: Option<String>,
}

impl BuildInfo {
    /// A completed build is stable only when Jenkins marked it SUCCESS.
    /// Anything else (FAILURE, UNSTABLE, ABORTED, still running) is not.
    fn is_stable(&self) -> bool {
        self.result.as_deref() == Some("SUCCESS")
    }
}

impl JenkinsClient {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_last_build(&self, job: &str) -> Result<BuildInfo, ClientError> {
        let uri = format!("http://{}/job/{job}/lastCompletedBuild/api/json", self.host);

        let stream = tokio::net::TcpStream::connect(&self.host)
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))?;

        let io = hyper_util::rt::TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| ClientError::Connect(e.to_string()))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = http::Request::builder()
            .method("GET")
            .uri(&uri)
            .header("host", &self.host)
            .header("user-agent", "buildwatch/0.1")
            .body(http_body_util::Empty::<bytes::Bytes>::new())
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Body(e.to_string()))?
            .to_bytes();

        serde_json::from_slice(&body).map_err(|e| ClientError::Body(e.to_string()))
    }
}

#[async_trait]
impl StabilityClient for JenkinsClient {
    async fn is_stable(&self, job: &str) -> Result<bool, ClientError> {
        let build = tokio::time::timeout(self.timeout, self.fetch_last_build(job))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;

        let stable = build.is_stable();
        debug!(%job, result = ?build.result, stable, "fetched last completed build");
        Ok(stable)
    }
}
