use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use babyassist_core::visits::{GeoPoint, NearestVisit, NewVisit, Visit, VisitUpdate};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct LocationQuery {
    lat: f64,
    lng: f64,
}

async fn get_visits(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Visit>>> {
    let visits = state.visit_service.get_visits()?;
    Ok(Json(visits))
}

async fn get_todays_visits(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Visit>>> {
    let visits = state.visit_service.get_todays_visits()?;
    Ok(Json(visits))
}

/// `null` when no scheduled visit has a located mother.
async fn get_nearest_visit(
    Query(location): Query<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<NearestVisit>>> {
    let origin = GeoPoint::new(location.lat, location.lng);
    let nearest = state.visit_service.find_nearest_scheduled_visit(origin)?;
    Ok(Json(nearest))
}

async fn get_visit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Visit>> {
    let visit = state.visit_service.get_visit(&id)?;
    Ok(Json(visit))
}

async fn create_visit(
    State(state): State<Arc<AppState>>,
    Json(visit): Json<NewVisit>,
) -> ApiResult<Json<Visit>> {
    let created = state.visit_service.create_visit(visit).await?;
    Ok(Json(created))
}

async fn update_visit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut visit): Json<VisitUpdate>,
) -> ApiResult<Json<Visit>> {
    visit.id = Some(id);
    let updated = state.visit_service.update_visit(visit).await?;
    Ok(Json(updated))
}

async fn delete_visit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.visit_service.delete_visit(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/visits", get(get_visits).post(create_visit))
        .route("/visits/today", get(get_todays_visits))
        .route("/visits/nearest", get(get_nearest_visit))
        .route(
            "/visits/{id}",
            get(get_visit).put(update_visit).delete(delete_visit),
        )
}
