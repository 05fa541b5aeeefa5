use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::middleware::AuthenticatedUser;
use super::service::{AuthResponse, LoginRequest, SignupRequest};
use crate::error::AppResult;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, UserDataResponse, ValidatedJson};

/// Register a new user
///
/// POST /auth/signup
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered and logged in", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = state.auth.signup(req).await?;
    Ok(Json(ApiResponse::success(resp)))
}

/// Login user
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = state.auth.login(req).await?;
    Ok(Json(ApiResponse::success(resp)))
}

/// Current user
///
/// GET /auth/user/data
#[utoipa::path(
    get,
    path = "/auth/user/data",
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<UserDataResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn user_data(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<UserDataResponse>> {
    Json(ApiResponse::success(UserDataResponse {
        user,
        status: "success".to_string(),
    }))
}
