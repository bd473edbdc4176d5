use crate::auth::models::Principal;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use futures::StreamExt;
use std::io;
use std::sync::Arc;
use tubely_core::constants::VIDEO_FORM_FIELD;
use tubely_core::models::VideoResponse;
use tubely_core::AppError;
use tubely_processing::UploadRequest;
use uuid::Uuid;

pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Uuid::parse_str(raw)
        .map_err(|_| HttpAppError(AppError::InvalidInput(format!("Invalid video ID: {}", raw))))
}

#[utoipa::path(
    post,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "ID of the video record to attach content to")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoResponse),
        (status = 400, description = "Invalid input or content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing failed", body = ErrorResponse),
        (status = 502, description = "Object store write failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip_all,
    fields(user_id = %principal.user_id, video_id = %video_id, operation = "upload_video")
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Malformed multipart body: {}",
            e.body_text()
        )))
    })? {
        if field.name() != Some(VIDEO_FORM_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let body = field.map(|chunk| chunk.map_err(|e| io::Error::other(e.body_text())));

        let video = state
            .orchestrator
            .upload(UploadRequest {
                user_id: principal.user_id,
                video_id,
                content_type,
                body,
            })
            .await?;

        let video = state.presigner.sign_video(video).await?;
        return Ok(Json(VideoResponse::from(video)));
    }

    Err(HttpAppError(AppError::InvalidInput(format!(
        "Missing '{}' form field",
        VIDEO_FORM_FIELD
    ))))
}
