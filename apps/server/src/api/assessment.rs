//! Stateless calculators over the assessment rules. Nothing is stored.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use babyassist_core::assessment::{
    assess, calculate_bmi, Answers, Assessment, BmiResult, SubjectType,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BmiRequest {
    weight_kg: Decimal,
    height_cm: Decimal,
    subject_type: SubjectType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusRequest {
    subject_type: SubjectType,
    #[serde(default)]
    answers: Answers,
    height_cm: Option<Decimal>,
}

async fn bmi(Json(request): Json<BmiRequest>) -> ApiResult<Json<BmiResult>> {
    let result = calculate_bmi(request.weight_kg, request.height_cm, request.subject_type)?;
    Ok(Json(result))
}

async fn health_status(Json(request): Json<StatusRequest>) -> ApiResult<Json<Assessment>> {
    let assessment = assess(&request.answers, request.subject_type, request.height_cm)?;
    Ok(Json(assessment))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assessment/bmi", post(bmi))
        .route("/assessment/status", post(health_status))
}
