use crate::auth::models::Principal;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::video_upload::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::models::VideoResponse;
use tubely_core::AppError;

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip_all,
    fields(user_id = %principal.user_id, video_id = %video_id, operation = "get_video")
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Path(video_id): Path<String>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .repository
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(principal.user_id) {
        return Err(HttpAppError(AppError::Forbidden(
            "Only the owner of a video can view it".to_string(),
        )));
    }

    let video = state.presigner.sign_video(video).await?;
    Ok(Json(VideoResponse::from(video)))
}
