use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::user_auth::token::SESSION_TTL_DAYS;

/// Env var overriding `postgres_url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Env var overriding `auth.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "CALORIE_JWT_SECRET";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    /// PostgreSQL connection URL
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. No default.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
}

fn default_session_ttl_days() -> i64 {
    SESSION_TTL_DAYS
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            session_ttl_days: SESSION_TTL_DAYS,
        }
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("session_ttl_days", &self.session_ttl_days)
            .finish()
    }
}

impl AppConfig {
    /// Read `config/{env}.yaml`, then apply environment overrides.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_overrides(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(JWT_SECRET_ENV).ok(),
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Non-empty override values replace the file settings.
    pub fn apply_overrides(&mut self, database_url: Option<String>, jwt_secret: Option<String>) {
        if let Some(url) = database_url.filter(|v| !v.trim().is_empty()) {
            self.postgres_url = Some(url);
        }
        if let Some(secret) = jwt_secret.filter(|v| !v.trim().is_empty()) {
            self.auth.jwt_secret = Some(secret);
        }
    }

    /// Settings the server cannot start without.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.auth.jwt_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => {}
            _ => bail!(
                "auth.jwt_secret is not set (configure it or export {})",
                JWT_SECRET_ENV
            ),
        }
        match self.postgres_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => bail!(
                "postgres_url is not set (configure it or export {})",
                DATABASE_URL_ENV
            ),
        }
        if self.auth.session_ttl_days <= 0 {
            bail!(
                "auth.session_ttl_days must be positive, got {}",
                self.auth.session_ttl_days
            );
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.auth.session_ttl_days)
    }
}
