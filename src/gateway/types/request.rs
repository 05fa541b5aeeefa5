//! Request bodies
//!
//! Shape checks run through `validator` in the [`ValidatedJson`] extractor;
//! domain rules (trimming, the calorie target floor) are enforced again by the
//! services so every entry point gets them.
//!
//! [`ValidatedJson`]: super::ValidatedJson

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::account::{AccountFlags, ProfileUpdate, UserUpdate};
use crate::account::models::MIN_CALORIE_PER_DAY;
use crate::error::AppResult;
use crate::meals::MealFields;

/// Create or replace a meal
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    #[validate(length(min = 1, max = 500, message = "must be 1 to 500 characters"))]
    #[schema(example = "Oatmeal with berries")]
    pub description: String,
    /// Also accepted as `calorieCount`
    #[serde(alias = "calorieCount")]
    #[validate(range(exclusive_min = 0.0, message = "must be a positive number"))]
    #[schema(example = 350.0)]
    pub calories: f64,
    #[validate(required(message = "is required"))]
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: Option<NaiveDate>,
}

impl MealRequest {
    pub fn into_fields(self) -> AppResult<MealFields> {
        MealFields::new(&self.description, self.calories, self.date)
    }
}

/// Admin: log a meal on behalf of a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminMealRequest {
    #[validate(range(min = 1, message = "must be a user id"))]
    #[schema(example = 2)]
    pub user_id: i64,
    #[validate(length(min = 1, max = 500, message = "must be 1 to 500 characters"))]
    pub description: String,
    #[serde(alias = "calorieCount")]
    #[validate(range(exclusive_min = 0.0, message = "must be a positive number"))]
    pub calories: f64,
    #[validate(required(message = "is required"))]
    #[schema(value_type = String, format = Date)]
    pub date: Option<NaiveDate>,
}

impl AdminMealRequest {
    pub fn into_parts(self) -> AppResult<(i64, MealFields)> {
        let fields = MealFields::new(&self.description, self.calories, self.date)?;
        Ok((self.user_id, fields))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[validate(range(min = MIN_CALORIE_PER_DAY, message = "must be at least 100"))]
    #[schema(example = 2000.0)]
    pub calorie_per_day: Option<f64>,
}

impl ProfileRequest {
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            username: Some(self.username),
            calorie_per_day: self.calorie_per_day,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "must be 8 to 128 characters"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "does not match newPassword"))]
    pub confirm_password: String,
}

/// Admin: create an account with explicit flags
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateUserRequest {
    #[schema(example = "bob")]
    pub username: String,
    #[validate(length(min = 8, max = 128, message = "must be 8 to 128 characters"))]
    pub password: String,
    /// Defaults to false
    pub is_admin: Option<bool>,
    /// Defaults to true
    pub is_activated: Option<bool>,
    #[validate(range(min = MIN_CALORIE_PER_DAY, message = "must be at least 100"))]
    pub calorie_per_day: Option<f64>,
}

impl AdminCreateUserRequest {
    pub fn flags(&self) -> AccountFlags {
        let defaults = AccountFlags::default();
        AccountFlags {
            is_activated: self.is_activated.unwrap_or(defaults.is_activated),
            is_admin: self.is_admin.unwrap_or(defaults.is_admin),
            calorie_per_day: self.calorie_per_day,
        }
    }
}

/// Admin: partial user update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub username: Option<String>,
    #[validate(range(min = MIN_CALORIE_PER_DAY, message = "must be at least 100"))]
    pub calorie_per_day: Option<f64>,
    pub is_activated: Option<bool>,
    pub is_admin: Option<bool>,
}

impl AdminUpdateUserRequest {
    pub fn into_update(self) -> UserUpdate {
        UserUpdate {
            username: self.username,
            calorie_per_day: self.calorie_per_day,
            is_activated: self.is_activated,
            is_admin: self.is_admin,
        }
    }
}
