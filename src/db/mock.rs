//! In-memory repositories for tests.
//!
//! One [`MemoryStore`] backs both the user and the meal repository so that
//! foreign-key and cascade behaviour matches the PostgreSQL schema.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::account::{NewUser, User, UserRepository, UserUpdate};
use crate::error::{AppError, AppResult};
use crate::meals::models::DailyTotal;
use crate::meals::{AdminMealView, Meal, MealFields, MealRepository, MealScope};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    meals: Vec<Meal>,
    next_user_id: i64,
    next_meal_id: i64,
    /// Insert counter; keeps `created_at` strictly increasing.
    tick: i64,
}

impl Tables {
    fn next_timestamp(&mut self) -> chrono::DateTime<Utc> {
        self.tick += 1;
        Utc::now() + Duration::microseconds(self.tick)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::DuplicateUsername(new_user.username));
        }
        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            is_activated: new_user.is_activated,
            is_admin: new_user.is_admin,
            calorie_per_day: new_user.calorie_per_day,
            created_at: t.next_timestamp(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        match t.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update(&self, user_id: i64, update: &UserUpdate) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        if let Some(name) = &update.username {
            if t.users.iter().any(|u| &u.username == name && u.id != user_id) {
                return Err(AppError::DuplicateUsername(name.clone()));
            }
        }
        match t.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                update.apply_to(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_with_meals(&self, user_id: i64) -> AppResult<Option<u64>> {
        let mut t = self.tables.lock().unwrap();
        if !t.users.iter().any(|u| u.id == user_id) {
            return Ok(None);
        }
        let before = t.meals.len();
        t.meals.retain(|m| m.created_by != user_id);
        let removed = (before - t.meals.len()) as u64;
        t.users.retain(|u| u.id != user_id);
        Ok(Some(removed))
    }
}

#[async_trait]
impl MealRepository for MemoryStore {
    async fn insert(&self, owner_id: i64, fields: &MealFields) -> AppResult<Meal> {
        let mut t = self.tables.lock().unwrap();
        if !t.users.iter().any(|u| u.id == owner_id) {
            return Err(AppError::NotFound("user"));
        }
        t.next_meal_id += 1;
        let meal = Meal {
            id: t.next_meal_id,
            description: fields.description().to_string(),
            calories: fields.calories(),
            date: fields.date(),
            created_by: owner_id,
            created_at: t.next_timestamp(),
        };
        t.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list(&self, scope: MealScope) -> AppResult<Vec<Meal>> {
        let t = self.tables.lock().unwrap();
        Ok(t.meals
            .iter()
            .filter(|m| scope.permits(m.created_by))
            .cloned()
            .collect())
    }

    async fn list_with_owner(&self) -> AppResult<Vec<AdminMealView>> {
        let t = self.tables.lock().unwrap();
        Ok(t.meals
            .iter()
            .filter_map(|m| {
                let owner = t.users.iter().find(|u| u.id == m.created_by)?;
                Some(AdminMealView {
                    id: m.id,
                    description: m.description.clone(),
                    calories: m.calories,
                    date: m.date,
                    created_by: m.created_by,
                    username: owner.username.clone(),
                    created_at: m.created_at,
                })
            })
            .collect())
    }

    async fn daily_totals(&self, owner_id: i64) -> AppResult<Vec<DailyTotal>> {
        let t = self.tables.lock().unwrap();
        let mut by_date = BTreeMap::new();
        for meal in t.meals.iter().filter(|m| m.created_by == owner_id) {
            *by_date.entry(meal.date).or_insert(0.0) += meal.calories;
        }
        Ok(by_date
            .into_iter()
            .map(|(date, total_calories)| DailyTotal {
                date,
                total_calories,
            })
            .collect())
    }

    async fn get(&self, scope: MealScope, meal_id: i64) -> AppResult<Option<Meal>> {
        let t = self.tables.lock().unwrap();
        Ok(t.meals
            .iter()
            .find(|m| m.id == meal_id && scope.permits(m.created_by))
            .cloned())
    }

    async fn update(&self, scope: MealScope, meal_id: i64, fields: &MealFields) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        match t
            .meals
            .iter_mut()
            .find(|m| m.id == meal_id && scope.permits(m.created_by))
        {
            Some(meal) => {
                meal.description = fields.description().to_string();
                meal.calories = fields.calories();
                meal.date = fields.date();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, scope: MealScope, meal_id: i64) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.meals.len();
        t.meals
            .retain(|m| !(m.id == meal_id && scope.permits(m.created_by)));
        Ok(t.meals.len() < before)
    }
}
