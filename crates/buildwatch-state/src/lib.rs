//! buildwatch-state — shared state for buildwatch.
//!
//! Holds the concurrency-safe job status store shared between the polling
//! checker and any number of HTTP readers, plus the check configuration.
//!
//! The `StatusStore` is `Clone` + `Send` + `Sync` (backed by
//! `Arc<RwLock<..>>`) and can be shared across async tasks. Writers and
//! readers coordinate only through its lock.

pub mod config;
pub mod store;
pub mod types;

pub use config::CheckConfig;
pub use store::StatusStore;
pub use types::JobStatus;
