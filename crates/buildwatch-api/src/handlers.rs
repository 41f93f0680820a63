//! Status endpoint handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::ApiState;

/// `/status` — any method.
///
/// Takes a snapshot of the store and encodes it outside the lock, so a
/// slow reader never blocks the checker. Responds identically regardless
/// of HTTP method.
pub async fn job_status(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;

    match serde_json::to_string_pretty(&snapshot) {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "application/json")],
            body,
        ),
        Err(e) => {
            // Unreachable for a string-to-string map, handled anyway.
            error!(error = %e, "failed to encode status report");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                format!("{e}{snapshot:?}"),
            )
        }
    }
}
