use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::main_lib::AppState;

async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers a read.
async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.dashboard_service.get_stats() {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(err) => {
            tracing::warn!("Readiness check failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
