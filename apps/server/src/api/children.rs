use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use babyassist_core::{
    children::{Child, ChildUpdate, NewChild},
    vaccinations::{Vaccination, VaccineChecklist},
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgeRangeQuery {
    min_months: Option<i32>,
    max_months: Option<i32>,
}

/// Lists children, optionally filtered to an inclusive age range in months.
async fn get_children(
    Query(range): Query<AgeRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Child>>> {
    let children = match (range.min_months, range.max_months) {
        (None, None) => state.child_service.get_children()?,
        (Some(min), Some(max)) => state.child_service.get_children_by_age_range(min, max)?,
        _ => {
            return Err(ApiError::BadRequest(
                "minMonths and maxMonths must be given together".to_string(),
            ))
        }
    };
    Ok(Json(children))
}

async fn get_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Child>> {
    let child = state.child_service.get_child(&id)?;
    Ok(Json(child))
}

async fn create_child(
    State(state): State<Arc<AppState>>,
    Json(child): Json<NewChild>,
) -> ApiResult<Json<Child>> {
    let created = state.child_service.create_child(child).await?;
    Ok(Json(created))
}

async fn update_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut child): Json<ChildUpdate>,
) -> ApiResult<Json<Child>> {
    child.id = Some(id);
    let updated = state.child_service.update_child(child).await?;
    Ok(Json(updated))
}

async fn delete_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.child_service.delete_child(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_vaccinations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vaccination>> {
    let record = state.vaccination_service.get_or_create_for_child(&id).await?;
    Ok(Json(record))
}

async fn update_vaccinations(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(checklist): Json<VaccineChecklist>,
) -> ApiResult<Json<Vaccination>> {
    let record = state
        .vaccination_service
        .update_progress(&id, checklist)
        .await?;
    Ok(Json(record))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/children", get(get_children).post(create_child))
        .route(
            "/children/{id}",
            get(get_child).put(update_child).delete(delete_child),
        )
        .route(
            "/children/{id}/vaccinations",
            get(get_vaccinations).put(update_vaccinations),
        )
}
