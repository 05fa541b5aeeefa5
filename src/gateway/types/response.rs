//! Success envelope and response DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::account::PublicUser;
use crate::meals::{DailyConsumption, Meal};

/// Unified success wrapper: `{"code": 0, "message": <payload>}`.
///
/// Errors use [`crate::error::ErrorResponse`] instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always 0 on success
    #[schema(example = 0)]
    pub code: i32,
    pub message: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: T) -> Self {
        Self { code: 0, message }
    }
}

impl ApiResponse<String> {
    /// Acknowledgement with a short status text.
    pub fn ack(text: &str) -> Self {
        Self::success(text.to_string())
    }
}

/// Payload of `GET /auth/user/data`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDataResponse {
    pub user: PublicUser,
    #[schema(example = "success")]
    pub status: String,
}

/// Payload of `GET /meals`
#[derive(Debug, Serialize, ToSchema)]
pub struct MealsOverview {
    pub meals: Vec<Meal>,
    /// Per-day totals, oldest day first
    pub consumption: Vec<DailyConsumption>,
}
