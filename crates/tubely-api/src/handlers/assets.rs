//! Serves objects written by the local filesystem backend.
//!
//! Under presigned delivery every request must carry a valid `expires`/`signature` pair
//! issued by [`tubely_storage::AssetUrlSigner`]. In other modes the route is public, but a
//! signature that is presented is still checked.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tubely_core::{AppError, DeliveryMode};
use tubely_storage::signing::SignatureRejection;

#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    pub expires: Option<u64>,
    pub signature: Option<String>,
}

fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "mp4" => "video/mp4",
        Some(ext) if ext == "webm" => "video/webm",
        Some(ext) if ext == "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

pub async fn serve_asset(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<AssetQuery>,
) -> Result<Response, HttpAppError> {
    let Some(signer) = state.asset_signer.as_ref() else {
        return Err(HttpAppError(AppError::NotFound(
            "Assets are not served by this backend".to_string(),
        )));
    };

    let signature_required = state.config.delivery() == DeliveryMode::Presigned;
    match (query.expires, query.signature.as_deref()) {
        (Some(expires), Some(signature)) => {
            signer
                .verify(&key, expires, signature)
                .map_err(|rejection| {
                    tracing::debug!(key = %key, ?rejection, "Rejected signed asset request");
                    let message = match rejection {
                        SignatureRejection::Expired => "Signed URL has expired",
                        SignatureRejection::Invalid => "Invalid signature",
                    };
                    HttpAppError(AppError::Forbidden(message.to_string()))
                })?;
        }
        _ if signature_required => {
            return Err(HttpAppError(AppError::Forbidden(
                "A signed URL is required".to_string(),
            )));
        }
        _ => {}
    }

    let (stream, size) = state.storage.download_stream(&key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&key).to_string()),
            (header::CONTENT_LENGTH, size.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
