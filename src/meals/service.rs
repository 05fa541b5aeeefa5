use std::sync::Arc;

use super::models::{AdminMealView, DailyConsumption, Meal, MealFields, MealScope};
use super::repository::MealRepository;
use crate::error::{AppError, AppResult};

/// Meal operations. Owner-scoped methods take the caller's id; the
/// `*_unscoped` and `all_meals` variants skip the owner filter and rely on
/// the admin gate in front of the routes that call them.
#[derive(Clone)]
pub struct MealService {
    repo: Arc<dyn MealRepository>,
}

impl MealService {
    pub fn new(repo: Arc<dyn MealRepository>) -> Self {
        Self { repo }
    }

    pub async fn add_meal(&self, owner_id: i64, fields: MealFields) -> AppResult<Meal> {
        let meal = self.repo.insert(owner_id, &fields).await?;
        tracing::debug!(meal_id = meal.id, owner_id, "meal added");
        Ok(meal)
    }

    pub async fn get_meals_for_user(&self, owner_id: i64) -> AppResult<Vec<Meal>> {
        self.repo.list(MealScope::Owner(owner_id)).await
    }

    /// Daily sums ordered by date, flagged against the owner's target.
    pub async fn get_daily_consumption(
        &self,
        owner_id: i64,
        calorie_per_day: Option<f64>,
    ) -> AppResult<Vec<DailyConsumption>> {
        let totals = self.repo.daily_totals(owner_id).await?;
        Ok(totals
            .into_iter()
            .map(|t| DailyConsumption::from_total(t, calorie_per_day))
            .collect())
    }

    pub async fn get_meal_by_id(&self, owner_id: i64, meal_id: i64) -> AppResult<Meal> {
        self.get_in_scope(MealScope::Owner(owner_id), meal_id).await
    }

    pub async fn update_meal(&self, owner_id: i64, meal_id: i64, fields: MealFields) -> AppResult<()> {
        self.update_in_scope(MealScope::Owner(owner_id), meal_id, fields)
            .await
    }

    pub async fn delete_meal(&self, owner_id: i64, meal_id: i64) -> AppResult<()> {
        self.delete_in_scope(MealScope::Owner(owner_id), meal_id)
            .await
    }

    /// Admin insert on behalf of another user. An unknown owner is `NotFound("user")`.
    pub async fn add_meal_for(&self, owner_id: i64, fields: MealFields) -> AppResult<Meal> {
        let meal = self.repo.insert(owner_id, &fields).await?;
        tracing::info!(meal_id = meal.id, owner_id, "meal added by admin");
        Ok(meal)
    }

    pub async fn get_all_meals(&self) -> AppResult<Vec<AdminMealView>> {
        self.repo.list_with_owner().await
    }

    pub async fn get_meal_by_id_unscoped(&self, meal_id: i64) -> AppResult<Meal> {
        self.get_in_scope(MealScope::Unscoped, meal_id).await
    }

    pub async fn update_meal_unscoped(&self, meal_id: i64, fields: MealFields) -> AppResult<()> {
        self.update_in_scope(MealScope::Unscoped, meal_id, fields)
            .await
    }

    pub async fn delete_meal_unscoped(&self, meal_id: i64) -> AppResult<()> {
        self.delete_in_scope(MealScope::Unscoped, meal_id).await
    }

    async fn get_in_scope(&self, scope: MealScope, meal_id: i64) -> AppResult<Meal> {
        self.repo
            .get(scope, meal_id)
            .await?
            .ok_or(AppError::NotFound("meal"))
    }

    async fn update_in_scope(
        &self,
        scope: MealScope,
        meal_id: i64,
        fields: MealFields,
    ) -> AppResult<()> {
        if !self.repo.update(scope, meal_id, &fields).await? {
            return Err(AppError::NotFound("meal"));
        }
        tracing::debug!(meal_id, ?scope, "meal updated");
        Ok(())
    }

    async fn delete_in_scope(&self, scope: MealScope, meal_id: i64) -> AppResult<()> {
        if !self.repo.delete(scope, meal_id).await? {
            return Err(AppError::NotFound("meal"));
        }
        tracing::debug!(meal_id, ?scope, "meal deleted");
        Ok(())
    }
}
