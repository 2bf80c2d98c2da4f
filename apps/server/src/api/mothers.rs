use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use babyassist_core::{
    children::Child,
    mothers::{Mother, MotherUpdate, NewMother, RiskLevel},
    visits::Visit,
};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_mothers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Mother>>> {
    let mothers = state.mother_service.get_mothers()?;
    Ok(Json(mothers))
}

async fn get_mother(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Mother>> {
    let mother = state.mother_service.get_mother(&id)?;
    Ok(Json(mother))
}

async fn create_mother(
    State(state): State<Arc<AppState>>,
    Json(mother): Json<NewMother>,
) -> ApiResult<Json<Mother>> {
    let created = state.mother_service.create_mother(mother).await?;
    Ok(Json(created))
}

async fn update_mother(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut mother): Json<MotherUpdate>,
) -> ApiResult<Json<Mother>> {
    mother.id = Some(id);
    let updated = state.mother_service.update_mother(mother).await?;
    Ok(Json(updated))
}

async fn delete_mother(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.mother_service.delete_mother(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_mother_children(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Child>>> {
    let children = state.child_service.get_children_for_mother(&id)?;
    Ok(Json(children))
}

async fn get_mother_visits(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Visit>>> {
    let visits = state.visit_service.get_visits_for_mother(&id)?;
    Ok(Json(visits))
}

async fn get_mothers_by_risk(
    Path(level): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Mother>>> {
    let risk_level: RiskLevel = level.parse()?;
    let mothers = state.mother_service.get_mothers_by_risk_level(risk_level)?;
    Ok(Json(mothers))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mothers", get(get_mothers).post(create_mother))
        .route(
            "/mothers/{id}",
            get(get_mother).put(update_mother).delete(delete_mother),
        )
        .route("/mothers/{id}/children", get(get_mother_children))
        .route("/mothers/{id}/visits", get(get_mother_visits))
        .route("/mothers/risk/{level}", get(get_mothers_by_risk))
}
