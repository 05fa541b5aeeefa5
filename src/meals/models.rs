//! Meal records and their derived views

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Which rows a meal query may touch.
///
/// Self-service routes always use `Owner`; only admin routes pass `Unscoped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealScope {
    Owner(i64),
    Unscoped,
}

impl MealScope {
    /// Owner id to filter on, `None` for unscoped access.
    pub fn owner_filter(self) -> Option<i64> {
        match self {
            Self::Owner(id) => Some(id),
            Self::Unscoped => None,
        }
    }

    pub fn permits(self, created_by: i64) -> bool {
        match self {
            Self::Owner(id) => id == created_by,
            Self::Unscoped => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Oatmeal with berries")]
    pub description: String,
    #[schema(example = 350.0)]
    pub calories: f64,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Meal joined with its owner's username, for the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminMealView {
    pub id: i64,
    pub description: String,
    pub calories: f64,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub created_by: i64,
    #[schema(example = "alice")]
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Validated editable meal fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MealFields {
    description: String,
    calories: f64,
    date: NaiveDate,
}

impl MealFields {
    /// # Errors
    /// `Validation` if the description is blank, calories are not a positive
    /// finite number, or the date is missing.
    pub fn new(description: &str, calories: f64, date: Option<NaiveDate>) -> AppResult<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::validation("description must not be empty"));
        }
        if !calories.is_finite() || calories <= 0.0 {
            return Err(AppError::validation("calories must be a positive number"));
        }
        let date = date.ok_or_else(|| AppError::validation("date is required"))?;

        Ok(Self {
            description: description.to_string(),
            calories,
            date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Sum of calories for one day, as aggregated by the store.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyConsumption {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub total_calories: f64,
    /// Day total is above the owner's `caloriePerDay` target.
    pub exceeded: bool,
}

impl DailyConsumption {
    pub fn from_total(total: DailyTotal, calorie_per_day: Option<f64>) -> Self {
        let exceeded = calorie_per_day.is_some_and(|target| total.total_calories > target);
        Self {
            date: total.date,
            total_calories: total.total_calories,
            exceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_meal_fields_validation() {
        assert!(MealFields::new("Toast", 120.0, Some(day(1))).is_ok());

        let cases = [
            ("", 120.0, Some(day(1))),
            ("   ", 120.0, Some(day(1))),
            ("Toast", 0.0, Some(day(1))),
            ("Toast", -5.0, Some(day(1))),
            ("Toast", f64::NAN, Some(day(1))),
            ("Toast", f64::INFINITY, Some(day(1))),
            ("Toast", 120.0, None),
        ];
        for (description, calories, date) in cases {
            let err = MealFields::new(description, calories, date).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(_)),
                "{:?} {} {:?}",
                description,
                calories,
                date
            );
        }
    }

    #[test]
    fn test_meal_fields_trims_description() {
        let fields = MealFields::new("  Soup  ", 200.0, Some(day(2))).unwrap();
        assert_eq!(fields.description(), "Soup");
        assert_eq!(fields.calories(), 200.0);
        assert_eq!(fields.date(), day(2));
    }

    #[test]
    fn test_scope() {
        assert_eq!(MealScope::Owner(3).owner_filter(), Some(3));
        assert_eq!(MealScope::Unscoped.owner_filter(), None);
        assert!(MealScope::Owner(3).permits(3));
        assert!(!MealScope::Owner(3).permits(4));
        assert!(MealScope::Unscoped.permits(4));
    }

    #[test]
    fn test_daily_consumption_flags_excess() {
        let total = DailyTotal {
            date: day(1),
            total_calories: 2100.0,
        };
        assert!(DailyConsumption::from_total(total.clone(), Some(2000.0)).exceeded);
        assert!(!DailyConsumption::from_total(total.clone(), Some(2100.0)).exceeded);
        assert!(!DailyConsumption::from_total(total, None).exceeded);
    }
}
