//! Repository layer for user rows

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{NewUser, User, UserUpdate};
use crate::error::{AppError, AppResult};

const USER_COLUMNS: &str =
    "id, username, password_hash, is_activated, is_admin, calorie_per_day, created_at";

/// Persistence seam for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `DuplicateUsername` when the name is taken.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn get_by_id(&self, user_id: i64) -> AppResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Returns `false` when no row matched.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<bool>;

    /// Returns `false` when no row matched.
    async fn update(&self, user_id: i64, update: &UserUpdate) -> AppResult<bool>;

    /// Delete the user's meals and the user in one transaction.
    /// Returns the number of meals removed, or `None` if the user did not exist.
    async fn delete_with_meals(&self, user_id: i64) -> AppResult<Option<u64>>;
}

/// PostgreSQL-backed [`UserRepository`].
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint violation on `users.username` to `DuplicateUsername`.
fn map_unique_violation(err: sqlx::Error, username: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateUsername(username.to_string())
        }
        _ => AppError::Store(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        // The unique constraint decides; no check-then-insert window.
        let sql = format!(
            r#"INSERT INTO users (username, password_hash, is_activated, is_admin, calorie_per_day)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (username) DO NOTHING
               RETURNING {USER_COLUMNS}"#
        );
        let row: Option<User> = sqlx::query_as(&sql)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .bind(new_user.is_activated)
            .bind(new_user.is_admin)
            .bind(new_user.calorie_per_day)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(AppError::DuplicateUsername(new_user.username))
    }

    async fn get_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let rows = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<bool> {
        let res = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update(&self, user_id: i64, update: &UserUpdate) -> AppResult<bool> {
        if update.is_empty() {
            return Ok(self.get_by_id(user_id).await?.is_some());
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut set = qb.separated(", ");
        if let Some(username) = &update.username {
            set.push("username = ").push_bind_unseparated(username.clone());
        }
        if let Some(cpd) = update.calorie_per_day {
            set.push("calorie_per_day = ").push_bind_unseparated(cpd);
        }
        if let Some(active) = update.is_activated {
            set.push("is_activated = ").push_bind_unseparated(active);
        }
        if let Some(admin) = update.is_admin {
            set.push("is_admin = ").push_bind_unseparated(admin);
        }
        qb.push(" WHERE id = ").push_bind(user_id);

        let res = qb.build().execute(&self.pool).await.map_err(|e| {
            map_unique_violation(e, update.username.as_deref().unwrap_or_default())
        })?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_with_meals(&self, user_id: i64) -> AppResult<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        // Lock the user row so no meal can be added for it mid-delete.
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let meals = sqlx::query("DELETE FROM meals WHERE created_by = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(meals))
    }
}
