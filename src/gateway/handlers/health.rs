//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::error::{ErrorKind, ErrorResponse};

/// Build identifier: crate version plus git hash.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH"));

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    #[schema(example = "0.1.0+abc1234")]
    pub version: String,
}

/// Health check endpoint
///
/// Pings PostgreSQL when one is configured. Failure details go to the log
/// only.
///
/// - Healthy: 200 OK + {code: 0, message: {timestampMs, version}}
/// - Unhealthy: 503 Service Unavailable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthResponse>, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> axum::response::Response {
    if let Some(db) = &state.db {
        if let Err(e) = db.health_check().await {
            tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
            let kind = ErrorKind::Internal;
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    code: kind.code(),
                    error: kind.name(),
                    message: "unavailable".to_string(),
                }),
            )
                .into_response();
        }
    }

    Json(ApiResponse::success(HealthResponse {
        timestamp_ms: Utc::now().timestamp_millis(),
        version: VERSION.to_string(),
    }))
    .into_response()
}
