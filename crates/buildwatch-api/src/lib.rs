//! buildwatch-api — HTTP status surface for buildwatch.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | any | `/status` | Current job status report as pretty-printed JSON |

pub mod handlers;

use axum::Router;
use axum::routing::any;

use buildwatch_state::StatusStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: StatusStore,
}

/// Build the status router.
pub fn build_router(store: StatusStore) -> Router {
    let state = ApiState { store };

    Router::new()
        .route("/status", any(handlers::job_status))
        .with_state(state)
}
