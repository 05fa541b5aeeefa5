//! Data models for user accounts

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lowest accepted daily calorie target.
pub const MIN_CALORIE_PER_DAY: f64 = 100.0;

/// User account as stored, including the password hash.
///
/// Never serialized; use [`PublicUser`] for anything leaving the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_activated: bool,
    pub is_admin: bool,
    pub calorie_per_day: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.is_activated
    }

    /// Strip the password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            is_activated: self.is_activated,
            is_admin: self.is_admin,
            calorie_per_day: self.calorie_per_day,
            created_at: self.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_activated: user.is_activated,
            is_admin: user.is_admin,
            calorie_per_day: user.calorie_per_day,
            created_at: user.created_at,
        }
    }
}

/// Sanitized user record returned by the API and attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    pub is_activated: bool,
    pub is_admin: bool,
    #[schema(example = 2000.0)]
    pub calorie_per_day: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Row to insert. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_activated: bool,
    pub is_admin: bool,
    pub calorie_per_day: Option<f64>,
}

/// Flags an admin may set when creating an account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountFlags {
    pub is_activated: bool,
    pub is_admin: bool,
    pub calorie_per_day: Option<f64>,
}

impl Default for AccountFlags {
    /// Self-service signup: active immediately, no admin rights, no target.
    fn default() -> Self {
        Self {
            is_activated: true,
            is_admin: false,
            calorie_per_day: None,
        }
    }
}

/// Partial update of a user row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub calorie_per_day: Option<f64>,
    pub is_activated: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.calorie_per_day.is_none()
            && self.is_activated.is_none()
            && self.is_admin.is_none()
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(cpd) = self.calorie_per_day {
            user.calorie_per_day = Some(cpd);
        }
        if let Some(active) = self.is_activated {
            user.is_activated = active;
        }
        if let Some(admin) = self.is_admin {
            user.is_admin = admin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "test".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            is_activated: true,
            is_admin: false,
            calorie_per_day: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_user_has_no_password_field() {
        let user = sample_user();
        let json = serde_json::to_value(user.to_public()).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "test");
        assert_eq!(json["isActivated"], true);
        assert_eq!(json["isAdmin"], false);
        assert!(json["caloriePerDay"].is_null());
    }

    #[test]
    fn test_signup_flags_activate_immediately() {
        let flags = AccountFlags::default();
        assert!(flags.is_activated);
        assert!(!flags.is_admin);
    }

    #[test]
    fn test_user_update_apply() {
        let mut user = sample_user();
        let update = UserUpdate {
            username: Some("renamed".to_string()),
            calorie_per_day: Some(1800.0),
            is_activated: Some(false),
            is_admin: None,
        };
        update.apply_to(&mut user);

        assert_eq!(user.username, "renamed");
        assert_eq!(user.calorie_per_day, Some(1800.0));
        assert!(!user.can_login());
        assert!(!user.is_admin);
        assert!(UserUpdate::default().is_empty());
        assert!(!update.is_empty());
    }
}
