//! Self-service meal routes. Every call is scoped to the caller.

use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::super::state::AppState;
use super::super::types::{ApiResponse, IdPath, MealRequest, MealsOverview, ValidatedJson};
use crate::error::AppResult;
use crate::meals::Meal;
use crate::user_auth::AuthenticatedUser;

/// List own meals with per-day totals
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Caller's meals and daily consumption", body = ApiResponse<MealsOverview>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> AppResult<Json<ApiResponse<MealsOverview>>> {
    let meals = state.meals.get_meals_for_user(user.id).await?;
    let consumption = state
        .meals
        .get_daily_consumption(user.id, user.calorie_per_day)
        .await?;
    Ok(Json(ApiResponse::success(MealsOverview { meals, consumption })))
}

#[utoipa::path(
    post,
    path = "/meals/add",
    request_body = MealRequest,
    responses(
        (status = 200, description = "Meal created", body = ApiResponse<Meal>),
        (status = 400, description = "Invalid meal"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn add_meal(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<MealRequest>,
) -> AppResult<Json<ApiResponse<Meal>>> {
    let meal = state.meals.add_meal(user.id, req.into_fields()?).await?;
    Ok(Json(ApiResponse::success(meal)))
}

#[utoipa::path(
    get,
    path = "/meals/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    responses(
        (status = 200, description = "Meal", body = ApiResponse<Meal>),
        (status = 404, description = "No such meal owned by the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    IdPath(meal_id): IdPath,
) -> AppResult<Json<ApiResponse<Meal>>> {
    let meal = state.meals.get_meal_by_id(user.id, meal_id).await?;
    Ok(Json(ApiResponse::success(meal)))
}

#[utoipa::path(
    post,
    path = "/meals/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    request_body = MealRequest,
    responses(
        (status = 200, description = "Meal updated", body = ApiResponse<String>),
        (status = 400, description = "Invalid meal"),
        (status = 404, description = "No such meal owned by the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn update_meal(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    IdPath(meal_id): IdPath,
    ValidatedJson(req): ValidatedJson<MealRequest>,
) -> AppResult<Json<ApiResponse<String>>> {
    state
        .meals
        .update_meal(user.id, meal_id, req.into_fields()?)
        .await?;
    Ok(Json(ApiResponse::ack("meal updated")))
}

#[utoipa::path(
    post,
    path = "/meals/delete/{id}",
    params(("id" = i64, Path, description = "Meal id")),
    responses(
        (status = 200, description = "Meal deleted", body = ApiResponse<String>),
        (status = 404, description = "No such meal owned by the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Meals"
)]
pub async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    IdPath(meal_id): IdPath,
) -> AppResult<Json<ApiResponse<String>>> {
    state.meals.delete_meal(user.id, meal_id).await?;
    Ok(Json(ApiResponse::ack("meal deleted")))
}
