use crate::auth::jwt::JwtService;
use crate::auth::models::Principal;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tubely_core::AppError;

/// Require `Authorization: Bearer <jwt>` and attach the [`Principal`] to the request.
pub async fn auth_middleware(
    State(jwt): State<Arc<JwtService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => token.trim(),
        _ => {
            return HttpAppError(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match jwt.validate(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            return HttpAppError(err).into_response();
        }
    };

    request.extensions_mut().insert(Principal {
        user_id: claims.sub,
    });

    next.run(request).await
}
