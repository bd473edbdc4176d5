use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = serde_json::json!({
        "status": "ready",
        "database": "unknown"
    });

    let mut overall_ready = true;
    match tokio::time::timeout(READINESS_TIMEOUT, state.repository.ping()).await {
        Ok(Ok(())) => response["database"] = serde_json::json!("ready"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database readiness check failed");
            response["database"] = serde_json::json!("not_ready");
            overall_ready = false;
        }
        Err(_) => {
            tracing::error!("Database readiness check timed out");
            response["database"] = serde_json::json!("timeout");
            overall_ready = false;
        }
    }

    let status_code = if overall_ready {
        StatusCode::OK
    } else {
        response["status"] = serde_json::json!("not_ready");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
