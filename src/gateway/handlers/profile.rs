use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{ApiResponse, ProfileRequest, ResetPasswordRequest, ValidatedJson};
use crate::account::PublicUser;
use crate::error::{AppError, AppResult};
use crate::user_auth::AuthenticatedUser;

/// Update own username and daily calorie target
#[utoipa::path(
    post,
    path = "/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<PublicUser>),
        (status = 400, description = "Invalid profile"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let updated = state.users.update_profile(user.id, req.into_update()).await?;
    Ok(Json(ApiResponse::success(updated.into())))
}

/// Change own password
///
/// Requires the current password.
#[utoipa::path(
    post,
    path = "/profile/resetpassword",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = ApiResponse<String>),
        (status = 400, description = "New password invalid or confirmation mismatch"),
        (status = 401, description = "Current password is wrong")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<String>>> {
    let stored = state.users.get_by_id(user.id).await?;
    if !state
        .users
        .verify_password(&req.current_password, &stored.password_hash)
    {
        tracing::warn!(user_id = user.id, "password change rejected: wrong current password");
        return Err(AppError::Authentication(
            "Current password is incorrect".to_string(),
        ));
    }

    state.users.change_password(user.id, &req.new_password).await?;
    Ok(Json(ApiResponse::ack("password updated")))
}
