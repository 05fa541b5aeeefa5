//! Admin routes
//!
//! Mounted behind `require_admin`. These are the only handlers that use the
//! unscoped meal operations or touch other users' accounts.

use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{
    AdminCreateUserRequest, AdminMealRequest, AdminUpdateUserRequest, ApiResponse, IdPath,
    MealRequest, ValidatedJson,
};
use crate::account::PublicUser;
use crate::error::{AppError, AppResult};
use crate::meals::{AdminMealView, Meal};
use crate::user_auth::AuthenticatedUser;

// ============================================================================
// Meals
// ============================================================================

/// All meals, with owner usernames
#[utoipa::path(
    get,
    path = "/admin/meals",
    responses(
        (status = 200, description = "All meals", body = ApiResponse<Vec<AdminMealView>>),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_meals(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<AdminMealView>>>> {
    let meals = state.meals.get_all_meals().await?;
    Ok(Json(ApiResponse::success(meals)))
}

/// Log a meal for any user
#[utoipa::path(
    post,
    path = "/admin/meals",
    request_body = AdminMealRequest,
    responses(
        (status = 200, description = "Meal created", body = ApiResponse<Meal>),
        (status = 400, description = "Invalid meal"),
        (status = 404, description = "Owner does not exist")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_meal(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AdminMealRequest>,
) -> AppResult<Json<ApiResponse<Meal>>> {
    let (owner_id, fields) = req.into_parts()?;
    let meal = state.meals.add_meal_for(owner_id, fields).await?;
    Ok(Json(ApiResponse::success(meal)))
}

#[utoipa::path(
    get,
    path = "/admin/meals/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    responses(
        (status = 200, description = "Meal", body = ApiResponse<Meal>),
        (status = 404, description = "Meal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    IdPath(meal_id): IdPath,
) -> AppResult<Json<ApiResponse<Meal>>> {
    let meal = state.meals.get_meal_by_id_unscoped(meal_id).await?;
    Ok(Json(ApiResponse::success(meal)))
}

#[utoipa::path(
    post,
    path = "/admin/meals/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    request_body = MealRequest,
    responses(
        (status = 200, description = "Meal updated", body = ApiResponse<String>),
        (status = 404, description = "Meal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_meal(
    State(state): State<Arc<AppState>>,
    IdPath(meal_id): IdPath,
    ValidatedJson(req): ValidatedJson<MealRequest>,
) -> AppResult<Json<ApiResponse<String>>> {
    state
        .meals
        .update_meal_unscoped(meal_id, req.into_fields()?)
        .await?;
    Ok(Json(ApiResponse::ack("meal updated")))
}

#[utoipa::path(
    post,
    path = "/admin/meals/delete/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    responses(
        (status = 200, description = "Meal deleted", body = ApiResponse<String>),
        (status = 404, description = "Meal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_meal(
    State(state): State<Arc<AppState>>,
    IdPath(meal_id): IdPath,
) -> AppResult<Json<ApiResponse<String>>> {
    state.meals.delete_meal_unscoped(meal_id).await?;
    Ok(Json(ApiResponse::ack("meal deleted")))
}

// ============================================================================
// Users
// ============================================================================

#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<PublicUser>>),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<PublicUser>>>> {
    let users = state.users.list_all().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(PublicUser::from).collect(),
    )))
}

/// Create an account, optionally admin or inactive
#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = AdminCreateUserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<PublicUser>),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<AdminCreateUserRequest>,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let flags = req.flags();
    let user = state
        .users
        .create_user_with(&req.username, &req.password, flags)
        .await?;
    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse<PublicUser>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    IdPath(user_id): IdPath,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let user = state.users.get_by_id(user_id).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<String>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    IdPath(user_id): IdPath,
    ValidatedJson(req): ValidatedJson<AdminUpdateUserRequest>,
) -> AppResult<Json<ApiResponse<String>>> {
    state.users.admin_update(user_id, req.into_update()).await?;
    Ok(Json(ApiResponse::ack("user updated")))
}

/// Delete a user and all of their meals
#[utoipa::path(
    post,
    path = "/admin/users/delete/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<String>),
        (status = 403, description = "Admins cannot delete themselves"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(admin)): Extension<AuthenticatedUser>,
    IdPath(user_id): IdPath,
) -> AppResult<Json<ApiResponse<String>>> {
    if admin.id == user_id {
        return Err(AppError::Authorization(
            "Admins cannot delete their own account".to_string(),
        ));
    }
    state.users.delete_user(user_id).await?;
    tracing::info!(admin_id = admin.id, user_id, "user deleted by admin");
    Ok(Json(ApiResponse::ack("user deleted")))
}
