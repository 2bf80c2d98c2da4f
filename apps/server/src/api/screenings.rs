use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use babyassist_core::{
    assessment::SubjectType,
    screenings::{ImageUpload, Screening, ScreeningStats},
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

async fn get_screenings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Screening>>> {
    let screenings = state.screening_service.get_screenings()?;
    Ok(Json(screenings))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<ScreeningStats>> {
    let stats = state.screening_service.get_stats()?;
    Ok(Json(stats))
}

async fn get_screenings_for(
    Path((subject, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Screening>>> {
    let subject: SubjectType = subject.parse()?;
    let screenings = state.screening_service.get_screenings_for(subject, &id)?;
    Ok(Json(screenings))
}

/// Reads the `file` part and optional `notes` part of an upload.
async fn read_upload(mut multipart: Multipart) -> ApiResult<(ImageUpload, Option<String>)> {
    let mut image: Option<ImageUpload> = None;
    let mut notes: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                image = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
            }
            "notes" => {
                let text = field.text().await?;
                let text = text.trim();
                if !text.is_empty() {
                    notes = Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    let image = image
        .filter(|image| !image.bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing file in multipart request".to_string()))?;
    Ok((image, notes))
}

/// Runs the screening workflow for the subject and returns the analysis
/// payloads together with the stored screenings.
async fn upload_screening(
    Path((subject, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let subject: SubjectType = subject.parse()?;
    let (image, notes) = read_upload(multipart).await?;
    tracing::info!(
        "Screening upload for {} {}: {} ({} bytes)",
        subject,
        id,
        image.file_name,
        image.bytes.len()
    );

    let response = match subject {
        SubjectType::Child => {
            let outcome = state
                .screening_service
                .screen_child(&id, image, notes)
                .await?;
            Json(outcome).into_response()
        }
        SubjectType::Mother => {
            let outcome = state
                .screening_service
                .screen_mother(&id, image, notes)
                .await?;
            Json(outcome).into_response()
        }
    };
    Ok(response)
}

async fn get_screening(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Screening>> {
    let screening = state.screening_service.get_screening(&id)?;
    Ok(Json(screening))
}

async fn delete_screening(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.screening_service.delete_screening(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/screenings", get(get_screenings))
        .route("/screenings/stats", get(get_stats))
        .route(
            "/screenings/item/{id}",
            get(get_screening).delete(delete_screening),
        )
        .route(
            "/screenings/{subject}/{id}",
            get(get_screenings_for)
                .post(upload_screening)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
