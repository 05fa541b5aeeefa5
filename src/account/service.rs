use std::sync::Arc;

use super::models::{AccountFlags, MIN_CALORIE_PER_DAY, NewUser, User, UserUpdate};
use super::password;
use super::repository::UserRepository;
use crate::error::{AppError, AppResult};

/// Same message for unknown user, wrong password and deactivated account.
pub const LOGIN_FAILED: &str = "Incorrect username or password";

pub const MAX_USERNAME_LEN: usize = 64;

/// Profile fields a user may change on their own account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub calorie_per_day: Option<f64>,
}

/// Credential store: user records plus password handling.
#[derive(Clone)]
pub struct CredentialStore {
    repo: Arc<dyn UserRepository>,
}

impl CredentialStore {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a self-service account (active, non-admin).
    pub async fn create_user(&self, username: &str, plaintext_password: &str) -> AppResult<User> {
        self.create_user_with(username, plaintext_password, AccountFlags::default())
            .await
    }

    pub async fn create_user_with(
        &self,
        username: &str,
        plaintext_password: &str,
        flags: AccountFlags,
    ) -> AppResult<User> {
        let username = normalize_username(username)?;
        if let Some(cpd) = flags.calorie_per_day {
            check_calorie_per_day(cpd)?;
        }
        let password_hash = password::hash_password(plaintext_password)?;

        let user = self
            .repo
            .create(NewUser {
                username,
                password_hash,
                is_activated: flags.is_activated,
                is_admin: flags.is_admin,
                calorie_per_day: flags.calorie_per_day,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, is_admin = user.is_admin, "user created");
        Ok(user)
    }

    pub fn verify_password(&self, plaintext: &str, stored_hash: &str) -> bool {
        password::verify_password(plaintext, stored_hash)
    }

    /// Check credentials and return the account if it may log in.
    pub async fn authenticate(&self, username: &str, plaintext_password: &str) -> AppResult<User> {
        let user = self
            .repo
            .get_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::Authentication(LOGIN_FAILED.to_string()))?;

        if !self.verify_password(plaintext_password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "login rejected: wrong password");
            return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
        }
        if !user.can_login() {
            tracing::warn!(user_id = user.id, "login rejected: account not activated");
            return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
        }
        Ok(user)
    }

    pub async fn change_password(&self, user_id: i64, new_plaintext: &str) -> AppResult<()> {
        let hash = password::hash_password(new_plaintext)?;
        if !self.repo.update_password(user_id, &hash).await? {
            return Err(AppError::NotFound("user"));
        }
        tracing::info!(user_id, "password changed");
        Ok(())
    }

    /// Self-service profile edit. Returns the updated record.
    pub async fn update_profile(&self, user_id: i64, update: ProfileUpdate) -> AppResult<User> {
        self.admin_update(
            user_id,
            UserUpdate {
                username: update.username,
                calorie_per_day: update.calorie_per_day,
                ..Default::default()
            },
        )
        .await
    }

    /// Partial update of any user field, including the role and activation flags.
    pub async fn admin_update(&self, user_id: i64, mut update: UserUpdate) -> AppResult<User> {
        if let Some(username) = update.username.take() {
            update.username = Some(normalize_username(&username)?);
        }
        if let Some(cpd) = update.calorie_per_day {
            check_calorie_per_day(cpd)?;
        }
        if !self.repo.update(user_id, &update).await? {
            return Err(AppError::NotFound("user"));
        }
        self.get_by_id(user_id).await
    }

    pub async fn get_by_id(&self, user_id: i64) -> AppResult<User> {
        self.repo
            .get_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    /// Like [`get_by_id`](Self::get_by_id) but absence is not an error.
    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        self.repo.get_by_id(user_id).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        self.repo.list_all().await
    }

    /// Remove a user and every meal they own.
    pub async fn delete_user(&self, user_id: i64) -> AppResult<()> {
        match self.repo.delete_with_meals(user_id).await? {
            Some(meals) => {
                tracing::info!(user_id, meals_removed = meals, "user deleted");
                Ok(())
            }
            None => Err(AppError::NotFound("user")),
        }
    }
}

/// Trim and require 1 to 64 characters.
pub fn normalize_username(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("username must not be empty"));
    }
    if trimmed.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

pub fn check_calorie_per_day(value: f64) -> AppResult<()> {
    if !value.is_finite() || value < MIN_CALORIE_PER_DAY {
        return Err(AppError::validation(format!(
            "caloriePerDay must be at least {}",
            MIN_CALORIE_PER_DAY
        )));
    }
    Ok(())
}
