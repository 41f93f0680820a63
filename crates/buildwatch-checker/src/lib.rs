//! buildwatch-checker — polls Jenkins for job stability.
//!
//! [`StabilityChecker`] runs one checking pass over the configured jobs and
//! records each outcome in the shared [`buildwatch_state::StatusStore`];
//! [`CheckMonitor`] wraps it in a periodic background loop.

pub mod checker;
pub mod client;
pub mod monitor;

pub use checker::StabilityChecker;
pub use client::{ClientError, JenkinsClient, StabilityClient};
pub use monitor::CheckMonitor;
