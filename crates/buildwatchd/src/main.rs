//! buildwatchd — the buildwatch daemon.
//!
//! Single binary that assembles the buildwatch subsystems:
//! - Job status store
//! - Jenkins stability checker + polling monitor
//! - HTTP status endpoint
//!
//! # Usage
//!
//! ```text
//! buildwatchd --jenkins-host ci.example.com:8080 --job kubernetes-e2e-gce --job kubernetes-e2e-gke
//! buildwatchd --config buildwatch.toml --port 8080
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use buildwatch_checker::{CheckMonitor, JenkinsClient, StabilityChecker};
use buildwatch_state::{CheckConfig, StatusStore};

#[derive(Parser)]
#[command(name = "buildwatchd", about = "CI job stability monitor")]
struct Cli {
    /// Port to serve the status endpoint on.
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Path to a buildwatch.toml config file.
    #[arg(long, conflicts_with_all = ["jenkins_host", "job"])]
    config: Option<PathBuf>,

    /// Jenkins host, host:port.
    #[arg(long, required_unless_present = "config")]
    jenkins_host: Option<String>,

    /// Job to check (repeatable).
    #[arg(long = "job", required_unless_present = "config")]
    job: Vec<String>,

    /// Seconds between checking passes.
    #[arg(long, default_value = "300")]
    check_interval: u64,
}

impl Cli {
    fn check_config(&self) -> anyhow::Result<CheckConfig> {
        match &self.config {
            Some(path) => CheckConfig::from_file(path),
            None => Ok(CheckConfig {
                host: self
                    .jenkins_host
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("--jenkins-host is required without --config"))?,
                jobs: self.job.clone(),
                interval_secs: self.check_interval,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,buildwatch=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.check_config()?;

    run(config, cli.port).await
}

async fn run(config: CheckConfig, port: u16) -> anyhow::Result<()> {
    info!(
        host = %config.host,
        jobs = config.jobs.len(),
        "buildwatch daemon starting"
    );

    // ── Initialize subsystems ──────────────────────────────────

    let store = StatusStore::new();
    let client = Arc::new(JenkinsClient::new(config.host.clone()));
    let checker = StabilityChecker::new(client, config.jobs, store.clone());
    let monitor = CheckMonitor::new(checker, Duration::from_secs(config.interval_secs));
    info!(interval = config.interval_secs, "stability checker initialized");

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start background polling ───────────────────────────────

    let monitor_handle = tokio::spawn(async move {
        monitor.run(shutdown_rx).await;
    });

    // ── Start status endpoint ──────────────────────────────────

    let router = buildwatch_api::build_router(store);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "status endpoint starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for the polling loop to wind down.
    let _ = monitor_handle.await;

    info!("buildwatch daemon stopped");
    Ok(())
}
