use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use babyassist_core::{
    assessment::{questions_for, Answers, Question, SubjectType},
    examinations::Examination,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct SubmitExaminationRequest {
    answers: Answers,
}

async fn get_questions(Path(subject): Path<String>) -> ApiResult<Json<&'static [Question]>> {
    let subject: SubjectType = subject.parse()?;
    Ok(Json(questions_for(subject)))
}

async fn get_examinations_for(
    Path((subject, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Examination>>> {
    let subject: SubjectType = subject.parse()?;
    let examinations = state.examination_service.get_examinations_for(subject, &id)?;
    Ok(Json(examinations))
}

async fn submit_examination(
    Path((subject, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitExaminationRequest>,
) -> ApiResult<Json<Examination>> {
    let subject: SubjectType = subject.parse()?;
    let examination = state
        .examination_service
        .submit_examination(subject, &id, request.answers)
        .await?;
    Ok(Json(examination))
}

async fn get_examination(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Examination>> {
    let examination = state.examination_service.get_examination(&id)?;
    Ok(Json(examination))
}

async fn delete_examination(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.examination_service.delete_examination(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/examinations/questions/{subject}", get(get_questions))
        .route(
            "/examinations/item/{id}",
            get(get_examination).delete(delete_examination),
        )
        .route(
            "/examinations/{subject}/{id}",
            get(get_examinations_for).post(submit_examination),
        )
}
