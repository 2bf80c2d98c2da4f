use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use babyassist_core::dashboard::DashboardStats;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardStats>> {
    let stats = state.dashboard_service.get_stats()?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/stats", get(get_stats))
}
